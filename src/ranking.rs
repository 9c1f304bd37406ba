//! Top-N leaderboards for publications and authors.

use crate::article::Article;
use crate::keyword::KeywordGroup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of entries a leaderboard carries by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Grouping field for a leaderboard query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankField {
    /// Group by publication name (`Source` column)
    Source,
    /// Group by author name (`Influencer` column)
    Influencer,
}

impl RankField {
    fn value<'a>(&self, article: &'a Article) -> &'a str {
        match self {
            RankField::Source => &article.source,
            RankField::Influencer => &article.influencer,
        }
    }
}

/// One leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position after sorting by volume descending
    pub rank: usize,
    /// The grouped field value (publication or author name)
    pub name: String,
    /// Matching-article count attributed to this name
    pub volume: usize,
    /// Sum of AVE over the matching articles of this name, rounded to 2
    /// decimals
    pub ave_total: f64,
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the top-`n` leaderboard for one keyword group.
///
/// Rows are filtered by the keyword match on the `Keywords` field and
/// grouped by the target field; the `n` values with the largest volume are
/// kept, their AVE totals computed over exactly the filtered rows, and the
/// result sorted by volume descending with ranks 1..k assigned in that
/// order. An empty filter yields an empty, correctly-shaped list.
///
/// Tie-break: values with equal volume keep their first-seen order in the
/// filtered table. The sort is stable, so this is deterministic for a given
/// dataset.
pub fn top_n(
    articles: &[Article],
    group: &KeywordGroup,
    field: RankField,
    n: usize,
) -> Vec<RankedEntry> {
    let filtered: Vec<&Article> = articles
        .iter()
        .filter(|a| group.matches(&a.keywords_text))
        .collect();

    let mut first_seen: Vec<String> = Vec::new();
    let mut volumes: HashMap<&str, usize> = HashMap::new();
    for article in &filtered {
        let value = field.value(article);
        if !volumes.contains_key(value) {
            first_seen.push(value.to_string());
        }
        *volumes.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|name| {
            let volume = volumes.get(name.as_str()).copied().unwrap_or(0);
            (name, volume)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);

    ranked
        .into_iter()
        .enumerate()
        .map(|(idx, (name, volume))| {
            let ave_total: f64 = filtered
                .iter()
                .filter(|a| field.value(a) == name)
                .map(|a| a.ave)
                .sum();
            RankedEntry {
                rank: idx + 1,
                name,
                volume,
                ave_total: round2(ave_total),
            }
        })
        .collect()
}

/// Top publications by volume for one keyword group, with the default list
/// length.
pub fn top_publications(articles: &[Article], group: &KeywordGroup) -> Vec<RankedEntry> {
    top_n(articles, group, RankField::Source, DEFAULT_TOP_N)
}

/// Top authors by volume for one keyword group, with the default list
/// length.
pub fn top_authors(articles: &[Article], group: &KeywordGroup) -> Vec<RankedEntry> {
    top_n(articles, group, RankField::Influencer, DEFAULT_TOP_N)
}
