//! Daily coverage trend.

use crate::article::{parse_article_date, Article, DATE_FORMAT_TREND};
use crate::engine::{DateHandling, QueryError};
use crate::keyword::KeywordGroup;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One point of the daily trend: an abbreviated `Mon-Day` label and the
/// number of matching articles on that calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub count: usize,
}

/// Computes the daily article-count trend for one keyword group.
///
/// Every row's date is parsed to a calendar day (time of day discarded), the
/// rows are filtered by the flattened OR keyword match against the
/// `Keywords` field, and the survivors are counted per day. Output is
/// ordered ascending by the underlying calendar date, not by the label text
/// (`Jan-31` sorts before `Feb-01`). Days with no matching articles are
/// omitted; gaps carry no explicit zeros.
///
/// # Errors
/// Under [`DateHandling::Strict`] a malformed date anywhere in the dataset —
/// matching or not, since every row's date is parsed — fails the query with
/// [`QueryError::InvalidDate`]. Under [`DateHandling::SkipInvalid`] such
/// rows are skipped with a warning.
pub fn daily_trend(
    articles: &[Article],
    group: &KeywordGroup,
    dates: DateHandling,
) -> Result<Vec<TrendPoint>, QueryError> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for (row, article) in articles.iter().enumerate() {
        let day = match parse_article_date(&article.date) {
            Ok(timestamp) => timestamp.date(),
            Err(_) => match dates {
                DateHandling::Strict => {
                    return Err(QueryError::InvalidDate {
                        row,
                        value: article.date.clone(),
                    })
                }
                DateHandling::SkipInvalid => {
                    log::warn!(
                        "skipping row {} with unparseable date '{}'",
                        row,
                        article.date
                    );
                    continue;
                }
            },
        };

        if group.matches(&article.keywords_text) {
            *counts.entry(day).or_insert(0) += 1;
        }
    }

    Ok(counts
        .into_iter()
        .map(|(day, count)| TrendPoint {
            label: day.format(DATE_FORMAT_TREND).to_string(),
            count,
        })
        .collect())
}
