use crate::article::{Article, DATE_FORMAT_READ};
use crate::coverage::{self, SentimentCounts, SentimentOverviewRow};
use crate::dataset::{DataSource, LoadError};
use crate::keyword::KeywordGroup;
use crate::prominence::{self, KeywordProminence, ProminenceTable};
use crate::ranking::{self, RankField, RankedEntry, DEFAULT_TOP_N};
use crate::trend::{self, TrendPoint};
use std::fmt;
use std::sync::OnceLock;

/// Policy for rows whose `Date` text does not conform to the fixed format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateHandling {
    /// A malformed date is a hard failure for any query touching it
    #[default]
    Strict,
    /// Malformed rows are skipped with a warning
    SkipInvalid,
}

/// Errors a query can surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The one-time dataset load failed; terminal for this engine instance
    Load(LoadError),
    /// A row's date text did not conform to the expected format
    InvalidDate { row: usize, value: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Load(cause) => write!(f, "Dataset load failed: {}", cause),
            QueryError::InvalidDate { row, value } => write!(
                f,
                "Invalid date '{}' at data row {}: expected format {}",
                value, row, DATE_FORMAT_READ
            ),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<LoadError> for QueryError {
    fn from(cause: LoadError) -> Self {
        QueryError::Load(cause)
    }
}

/// The aggregation engine: a set of stateless query operations over a
/// dataset loaded exactly once per engine instance.
///
/// The dataset is loaded lazily on the first query and cached for the
/// lifetime of the engine; the cache slot is a [`OnceLock`], so concurrent
/// first queries race safely to populate it and every later query reads the
/// same immutable table. A load failure is cached the same way and resurfaces
/// on every subsequent query — construct a new engine against a corrected
/// source to retry.
///
/// Queries are independent request/response calls: each re-derives its own
/// filtered view, none depends on another's result, and repeated calls with
/// identical arguments yield identical output.
#[derive(Debug)]
pub struct AnalyticsEngine<S: DataSource> {
    source: S,
    date_handling: DateHandling,
    dataset: OnceLock<Result<Vec<Article>, LoadError>>,
}

impl<S: DataSource> AnalyticsEngine<S> {
    /// Creates an engine over a data source with strict date handling.
    pub fn new(source: S) -> Self {
        Self::with_date_handling(source, DateHandling::default())
    }

    /// Creates an engine with an explicit malformed-date policy.
    pub fn with_date_handling(source: S, date_handling: DateHandling) -> Self {
        AnalyticsEngine {
            source,
            date_handling,
            dataset: OnceLock::new(),
        }
    }

    /// Returns the configured malformed-date policy.
    pub fn date_handling(&self) -> DateHandling {
        self.date_handling
    }

    /// Loads the dataset if this is the first access, returning the cached
    /// table afterwards without re-reading the source.
    ///
    /// # Errors
    /// Returns the (cached) load failure with the underlying cause attached.
    pub fn load(&self) -> Result<&[Article], QueryError> {
        match self.dataset.get_or_init(|| self.source.load()) {
            Ok(articles) => Ok(articles),
            Err(cause) => Err(QueryError::Load(cause.clone())),
        }
    }

    /// Number of articles whose `Keywords` field matches the group.
    pub fn total_articles(&self, group: &KeywordGroup) -> Result<usize, QueryError> {
        Ok(coverage::total_articles(self.load()?, group))
    }

    /// Number of articles whose headline matches the group.
    pub fn headline_presence(&self, group: &KeywordGroup) -> Result<usize, QueryError> {
        Ok(coverage::headline_presence(self.load()?, group))
    }

    /// Total reach over the keywords-filtered set.
    pub fn reach_sum(&self, group: &KeywordGroup) -> Result<f64, QueryError> {
        Ok(coverage::reach_sum(self.load()?, group))
    }

    /// Total AVE over the keywords-filtered set.
    pub fn ave_sum(&self, group: &KeywordGroup) -> Result<f64, QueryError> {
        Ok(coverage::ave_sum(self.load()?, group))
    }

    /// Sentiment tallies over the keywords-filtered set.
    pub fn sentiment_counts(&self, group: &KeywordGroup) -> Result<SentimentCounts, QueryError> {
        Ok(coverage::sentiment_counts(self.load()?, group))
    }

    /// Per-group sentiment overview table; groups are scored independently.
    pub fn sentiment_overview(
        &self,
        groups: &[KeywordGroup],
    ) -> Result<Vec<SentimentOverviewRow>, QueryError> {
        Ok(coverage::sentiment_overview(self.load()?, groups))
    }

    /// Daily article-count trend, ordered by calendar date.
    pub fn daily_trend(&self, group: &KeywordGroup) -> Result<Vec<TrendPoint>, QueryError> {
        trend::daily_trend(self.load()?, group, self.date_handling)
    }

    /// Top-`n` leaderboard grouped by the given field.
    pub fn top_n(
        &self,
        group: &KeywordGroup,
        field: RankField,
        n: usize,
    ) -> Result<Vec<RankedEntry>, QueryError> {
        Ok(ranking::top_n(self.load()?, group, field, n))
    }

    /// Top publications by volume (default list length).
    pub fn top_publications(&self, group: &KeywordGroup) -> Result<Vec<RankedEntry>, QueryError> {
        self.top_n(group, RankField::Source, DEFAULT_TOP_N)
    }

    /// Top authors by volume (default list length).
    pub fn top_authors(&self, group: &KeywordGroup) -> Result<Vec<RankedEntry>, QueryError> {
        self.top_n(group, RankField::Influencer, DEFAULT_TOP_N)
    }

    /// Per-article prominence table for a list of groups.
    pub fn prominence_scores(
        &self,
        groups: &[KeywordGroup],
    ) -> Result<ProminenceTable, QueryError> {
        prominence::prominence_scores(self.load()?, groups, self.date_handling)
    }

    /// Per-group prominence totals and averages.
    pub fn prominence_summary(
        &self,
        groups: &[KeywordGroup],
    ) -> Result<Vec<KeywordProminence>, QueryError> {
        Ok(prominence::prominence_summary(self.load()?, groups))
    }
}
