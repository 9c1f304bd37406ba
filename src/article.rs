use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format the `Date` column is stored in, e.g. `05-Mar-2024 07:30am`.
pub const DATE_FORMAT_READ: &str = "%d-%b-%Y %I:%M%p";

/// Display format for daily trend labels, e.g. `Mar-05`.
pub const DATE_FORMAT_TREND: &str = "%b-%d";

/// Display format for the date column of prominence tables, e.g. `2024-03-05`.
pub const DATE_FORMAT_PROMINENCE: &str = "%Y-%m-%d";

/// Sentiment classification attached to an article by the upstream dataset.
///
/// Sentiment is a pre-existing categorical field; this crate never computes
/// it. Parsing is lenient: literals other than the three recognized values
/// map to `None` and are excluded from every sentiment tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parses a sentiment literal by exact match.
    ///
    /// # Returns
    /// `Some(Sentiment)` for the literals `"Positive"`, `"Neutral"` and
    /// `"Negative"`, `None` for anything else (including case variants).
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "Positive" => Some(Sentiment::Positive),
            "Neutral" => Some(Sentiment::Neutral),
            "Negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Returns the canonical literal for this sentiment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

/// One row of the media-mentions dataset: a single published article.
///
/// All text fields are stored by value; missing cells load as empty strings
/// (numeric cells as 0.0), so keyword matching against an absent field yields
/// "no match" rather than a failure. The `date` field keeps the raw textual
/// timestamp and is parsed on demand by the queries that need a calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Free-text tag field; keyword membership is a substring test here.
    pub keywords_text: String,
    /// Article headline.
    pub headline: String,
    /// Raw timestamp text in [`DATE_FORMAT_READ`].
    pub date: String,
    /// Sentiment classification; `None` for unrecognized literals.
    pub sentiment: Option<Sentiment>,
    /// Audience reach figure.
    pub reach: f64,
    /// Advertising value equivalent.
    pub ave: f64,
    /// Publication name.
    pub source: String,
    /// Author name.
    pub influencer: String,
    /// First part of the article text; used only by prominence scoring.
    pub opening_text: String,
    /// Quoted or key sentence; used only by prominence scoring.
    pub hit_sentence: String,
}

/// Parses an article's raw date text into a timestamp.
///
/// # Errors
/// Returns the underlying `chrono` parse error if the text does not conform
/// to [`DATE_FORMAT_READ`]. Callers decide whether that is fatal (strict
/// policy) or a skip-and-warn (lenient policy).
pub fn parse_article_date(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT_READ)
}
