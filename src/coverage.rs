//! Coverage and sentiment queries.
//!
//! Stateless filter-then-reduce scalars over the loaded dataset. Every
//! function is a pure function of its arguments: calling twice with the same
//! dataset and group yields the same result, and nothing here mutates or
//! caches anything.

use crate::article::{Article, Sentiment};
use crate::keyword::KeywordGroup;
use serde::{Deserialize, Serialize};

/// Sentiment tallies for one keyword group. All three buckets are always
/// present; articles with unrecognized sentiment literals land in none of
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    /// Sum of the three buckets. At most the matched-article count; equal to
    /// it when every matched row carries a recognized sentiment literal.
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// One row of the per-group sentiment overview table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentOverviewRow {
    /// Primary alias of the group the counts belong to
    pub keyword: String,
    pub counts: SentimentCounts,
}

/// Counts the articles whose `Keywords` field matches the group.
pub fn total_articles(articles: &[Article], group: &KeywordGroup) -> usize {
    articles
        .iter()
        .filter(|a| group.matches(&a.keywords_text))
        .count()
}

/// Counts the articles whose headline matches the group.
///
/// This is an independent filter over the `Headline` field, not a subset of
/// the keywords filter: an article can count here without matching in its
/// `Keywords` field and vice versa.
pub fn headline_presence(articles: &[Article], group: &KeywordGroup) -> usize {
    articles
        .iter()
        .filter(|a| group.matches(&a.headline))
        .count()
}

/// Sums `Reach` over the keywords-filtered set; 0 if nothing matches.
pub fn reach_sum(articles: &[Article], group: &KeywordGroup) -> f64 {
    articles
        .iter()
        .filter(|a| group.matches(&a.keywords_text))
        .map(|a| a.reach)
        .sum()
}

/// Sums `AVE` over the keywords-filtered set; 0 if nothing matches.
pub fn ave_sum(articles: &[Article], group: &KeywordGroup) -> f64 {
    articles
        .iter()
        .filter(|a| group.matches(&a.keywords_text))
        .map(|a| a.ave)
        .sum()
}

/// Tallies sentiment over the keywords-filtered set.
pub fn sentiment_counts(articles: &[Article], group: &KeywordGroup) -> SentimentCounts {
    let mut counts = SentimentCounts::default();
    for article in articles.iter().filter(|a| group.matches(&a.keywords_text)) {
        match article.sentiment {
            Some(Sentiment::Positive) => counts.positive += 1,
            Some(Sentiment::Neutral) => counts.neutral += 1,
            Some(Sentiment::Negative) => counts.negative += 1,
            None => {}
        }
    }
    counts
}

/// Builds the sentiment overview table: one row per group, scored
/// independently (groups are never ORed against each other).
pub fn sentiment_overview(
    articles: &[Article],
    groups: &[KeywordGroup],
) -> Vec<SentimentOverviewRow> {
    groups
        .iter()
        .map(|group| SentimentOverviewRow {
            keyword: group.primary().to_string(),
            counts: sentiment_counts(articles, group),
        })
        .collect()
}
