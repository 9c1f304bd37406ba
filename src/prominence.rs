//! Prominence scoring.
//!
//! A per-(article, group) weighted relevance score based on which text field
//! contains a matching alias: headline beats opening text beats hit
//! sentence, and an article matching in several fields gets only the highest
//! applicable weight, never a sum.

use crate::article::{parse_article_date, Article, DATE_FORMAT_PROMINENCE};
use crate::engine::{DateHandling, QueryError};
use crate::keyword::KeywordGroup;
use crate::ranking::round2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Weight when an alias occurs in the headline.
pub const SCORE_HEADLINE: f64 = 1.0;
/// Weight when an alias occurs in the opening text only.
pub const SCORE_OPENING_TEXT: f64 = 0.7;
/// Weight when an alias occurs in the hit sentence only.
pub const SCORE_HIT_SENTENCE: f64 = 0.1;

/// Scores one article against one keyword group.
///
/// Field priority is fixed and short-circuiting: a headline match always
/// yields [`SCORE_HEADLINE`] regardless of the other fields.
pub fn prominence_score(article: &Article, group: &KeywordGroup) -> f64 {
    if group.matches(&article.headline) {
        SCORE_HEADLINE
    } else if group.matches(&article.opening_text) {
        SCORE_OPENING_TEXT
    } else if group.matches(&article.hit_sentence) {
        SCORE_HIT_SENTENCE
    } else {
        0.0
    }
}

/// One row of the prominence table: the full article record plus one score
/// per requested group, aligned with [`ProminenceTable::labels`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProminenceRow {
    pub article: Article,
    pub scores: Vec<f64>,
}

impl ProminenceRow {
    /// Largest score across the group columns.
    pub fn max_score(&self) -> f64 {
        self.scores.iter().copied().fold(0.0, f64::max)
    }
}

/// Output table of [`prominence_scores`]: column labels plus scored rows,
/// already sorted and filtered. An empty `labels` means no group survived
/// construction and the table carries the original schema only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProminenceTable {
    /// Human-readable score-column labels, one per requested group
    pub labels: Vec<String>,
    pub rows: Vec<ProminenceRow>,
}

/// Builds the per-article prominence table for a list of keyword groups.
///
/// Every group is scored independently against every article (no
/// pre-filter). Rows whose maximum score across all groups is 0 are dropped
/// entirely; surviving rows get their date reformatted to
/// [`DATE_FORMAT_PROMINENCE`] and are sorted by the full score vector as a
/// composite descending key, so rows relevant to every group surface first.
/// The sort is stable: rows with identical score vectors keep dataset order.
///
/// Score-column labels are the group's primary alias, or a synthetic
/// `Keyword N Prominence Score` when the group carries several aliases.
///
/// An empty `groups` list yields an empty table with no score columns —
/// never an error.
///
/// # Errors
/// Only surviving rows have their date touched: under
/// [`DateHandling::Strict`] a malformed date on such a row fails the query;
/// under [`DateHandling::SkipInvalid`] the row is dropped with a warning.
pub fn prominence_scores(
    articles: &[Article],
    groups: &[KeywordGroup],
    dates: DateHandling,
) -> Result<ProminenceTable, QueryError> {
    if groups.is_empty() {
        return Ok(ProminenceTable::default());
    }

    let labels = groups
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            if group.is_compound() {
                format!("Keyword {} Prominence Score", idx + 1)
            } else {
                group.primary().to_string()
            }
        })
        .collect();

    let mut rows: Vec<ProminenceRow> = Vec::new();
    for (row_idx, article) in articles.iter().enumerate() {
        let scores: Vec<f64> = groups
            .iter()
            .map(|group| prominence_score(article, group))
            .collect();
        if !scores.iter().any(|&score| score > 0.0) {
            continue;
        }

        let timestamp = match parse_article_date(&article.date) {
            Ok(timestamp) => timestamp,
            Err(_) => match dates {
                DateHandling::Strict => {
                    return Err(QueryError::InvalidDate {
                        row: row_idx,
                        value: article.date.clone(),
                    })
                }
                DateHandling::SkipInvalid => {
                    log::warn!(
                        "skipping row {} with unparseable date '{}'",
                        row_idx,
                        article.date
                    );
                    continue;
                }
            },
        };

        let mut article = article.clone();
        article.date = timestamp.format(DATE_FORMAT_PROMINENCE).to_string();
        rows.push(ProminenceRow { article, scores });
    }

    rows.sort_by(|a, b| compare_scores_desc(&a.scores, &b.scores));

    Ok(ProminenceTable { labels, rows })
}

/// Compares two score vectors as composite descending sort keys.
fn compare_scores_desc(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match y.partial_cmp(x) {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => return ordering,
        }
    }
    Ordering::Equal
}

/// Summary line for one keyword group: total prominence across the dataset
/// and the average over articles that scored at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordProminence {
    /// Title-cased primary alias of the group
    pub keyword: String,
    /// Sum of per-article scores, rounded to 2 decimals
    pub total: f64,
    /// Total divided by the count of strictly-positive scorers, rounded to
    /// 2 decimals; 0 when nothing scored
    pub average: f64,
}

/// Computes the prominence summary for each group, one pass over the dataset
/// per group, no pre-filtering. Output order is input group order.
pub fn prominence_summary(
    articles: &[Article],
    groups: &[KeywordGroup],
) -> Vec<KeywordProminence> {
    groups
        .iter()
        .map(|group| {
            let mut total = 0.0;
            let mut scored = 0usize;
            for article in articles {
                let score = prominence_score(article, group);
                if score > 0.0 {
                    total += score;
                    scored += 1;
                }
            }
            let average = if scored > 0 {
                round2(total / scored as f64)
            } else {
                0.0
            };
            KeywordProminence {
                keyword: title_case(group.primary()),
                total: round2(total),
                average,
            }
        })
        .collect()
}

/// Title-cases a label: first letter of each alphabetic run uppercased, the
/// rest lowercased.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(headline: &str, opening: &str, hit: &str) -> Article {
        Article {
            headline: headline.to_string(),
            opening_text: opening.to_string(),
            hit_sentence: hit.to_string(),
            date: "05-Mar-2024 07:30am".to_string(),
            ..Article::default()
        }
    }

    #[test]
    fn test_score_field_priority() {
        let group = KeywordGroup::new("Acme");
        assert_eq!(prominence_score(&article("Acme here", "", ""), &group), 1.0);
        assert_eq!(prominence_score(&article("", "Acme here", ""), &group), 0.7);
        assert_eq!(prominence_score(&article("", "", "Acme here"), &group), 0.1);
        assert_eq!(prominence_score(&article("", "", ""), &group), 0.0);
    }

    #[test]
    fn test_score_headline_wins_over_everything() {
        // Matching in multiple fields yields the highest weight, never a sum
        let group = KeywordGroup::new("Acme");
        let a = article("Acme wins", "Acme mentioned", "Acme quoted");
        assert_eq!(prominence_score(&a, &group), 1.0);
    }

    #[test]
    fn test_score_case_insensitive() {
        let group = KeywordGroup::new("acme");
        assert_eq!(prominence_score(&article("ACME WINS", "", ""), &group), 1.0);
    }

    #[test]
    fn test_prominence_scores_drops_all_zero_rows() {
        let articles = vec![
            article("Acme wins", "", ""),
            article("nothing relevant", "", ""),
        ];
        let groups = vec![KeywordGroup::new("Acme")];

        let table = prominence_scores(&articles, &groups, DateHandling::Strict).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows.iter().all(|row| row.max_score() > 0.0));
    }

    #[test]
    fn test_prominence_scores_sorted_descending_by_score_columns() {
        let articles = vec![
            article("", "", "Acme quoted"),
            article("Acme wins", "", ""),
            article("", "Acme mentioned", ""),
        ];
        let groups = vec![KeywordGroup::new("Acme")];

        let table = prominence_scores(&articles, &groups, DateHandling::Strict).unwrap();
        let scores: Vec<f64> = table.rows.iter().map(|row| row.scores[0]).collect();
        assert_eq!(scores, vec![1.0, 0.7, 0.1]);
    }

    #[test]
    fn test_prominence_scores_composite_sort_uses_later_columns() {
        // Both rows score 1.0 for the first group; the second group's score
        // breaks the tie
        let mut first = article("Acme and Zenith", "", "");
        first.keywords_text = "first".to_string();
        let mut second = article("Acme only", "", "");
        second.keywords_text = "second".to_string();

        let articles = vec![second.clone(), first.clone()];
        let groups = vec![KeywordGroup::new("Acme"), KeywordGroup::new("Zenith")];

        let table = prominence_scores(&articles, &groups, DateHandling::Strict).unwrap();
        assert_eq!(table.rows[0].article.keywords_text, "first");
        assert_eq!(table.rows[0].scores, vec![1.0, 1.0]);
        assert_eq!(table.rows[1].scores, vec![1.0, 0.0]);
    }

    #[test]
    fn test_prominence_scores_tied_rows_keep_dataset_order() {
        let mut a = article("Acme first", "", "");
        a.source = "A".to_string();
        let mut b = article("Acme second", "", "");
        b.source = "B".to_string();

        let table = prominence_scores(
            &[a, b],
            &[KeywordGroup::new("Acme")],
            DateHandling::Strict,
        )
        .unwrap();
        assert_eq!(table.rows[0].article.source, "A");
        assert_eq!(table.rows[1].article.source, "B");
    }

    #[test]
    fn test_prominence_scores_reformats_date() {
        let articles = vec![article("Acme wins", "", "")];
        let table = prominence_scores(
            &articles,
            &[KeywordGroup::new("Acme")],
            DateHandling::Strict,
        )
        .unwrap();
        assert_eq!(table.rows[0].article.date, "2024-03-05");
    }

    #[test]
    fn test_prominence_scores_date_only_touched_for_survivors() {
        // The malformed date sits on a non-matching row and must not fail
        let mut irrelevant = article("nothing", "", "");
        irrelevant.date = "garbage".to_string();
        let articles = vec![irrelevant, article("Acme wins", "", "")];

        let table = prominence_scores(
            &articles,
            &[KeywordGroup::new("Acme")],
            DateHandling::Strict,
        )
        .unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_prominence_scores_strict_fails_on_surviving_malformed_date() {
        let mut bad = article("Acme wins", "", "");
        bad.date = "garbage".to_string();

        let result = prominence_scores(
            &[bad],
            &[KeywordGroup::new("Acme")],
            DateHandling::Strict,
        );
        assert_eq!(
            result.unwrap_err(),
            QueryError::InvalidDate {
                row: 0,
                value: "garbage".to_string()
            }
        );
    }

    #[test]
    fn test_prominence_scores_skip_invalid_drops_row() {
        let mut bad = article("Acme wins", "", "");
        bad.date = "garbage".to_string();
        let articles = vec![bad, article("Acme also wins", "", "")];

        let table = prominence_scores(
            &articles,
            &[KeywordGroup::new("Acme")],
            DateHandling::SkipInvalid,
        )
        .unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_prominence_scores_empty_groups_yield_empty_table() {
        let articles = vec![article("Acme wins", "", "")];
        let table = prominence_scores(&articles, &[], DateHandling::Strict).unwrap();
        assert!(table.labels.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_prominence_scores_column_labels() {
        let groups = vec![
            KeywordGroup::new("Acme"),
            KeywordGroup::from_aliases(vec![Some("Zenith"), Some("ZNT")]).unwrap(),
        ];
        let table =
            prominence_scores(&[article("Acme wins", "", "")], &groups, DateHandling::Strict)
                .unwrap();
        assert_eq!(
            table.labels,
            vec![
                "Acme".to_string(),
                "Keyword 2 Prominence Score".to_string()
            ]
        );
    }

    #[test]
    fn test_prominence_summary_totals_and_average() {
        let articles = vec![
            article("Acme wins award", "", ""),
            article("Rival news", "Acme mentioned here", ""),
            article("unrelated", "", ""),
        ];
        let summary = prominence_summary(&articles, &[KeywordGroup::new("Acme")]);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].keyword, "Acme");
        assert_eq!(summary[0].total, 1.7);
        // Average over the two strictly-positive scorers, not all three rows
        assert_eq!(summary[0].average, 0.85);
    }

    #[test]
    fn test_prominence_summary_zero_scorers_average_zero() {
        let articles = vec![article("nothing", "", "")];
        let summary = prominence_summary(&articles, &[KeywordGroup::new("Acme")]);
        assert_eq!(summary[0].total, 0.0);
        assert_eq!(summary[0].average, 0.0);
    }

    #[test]
    fn test_prominence_summary_preserves_group_order() {
        let articles = vec![article("Zenith wins", "", "")];
        let groups = vec![KeywordGroup::new("zenith"), KeywordGroup::new("acme")];
        let summary = prominence_summary(&articles, &groups);
        assert_eq!(summary[0].keyword, "Zenith");
        assert_eq!(summary[1].keyword, "Acme");
    }

    #[test]
    fn test_prominence_summary_title_cases_label() {
        let articles: Vec<Article> = Vec::new();
        let group = KeywordGroup::new("acme airlines");
        let summary = prominence_summary(&articles, &[group]);
        assert_eq!(summary[0].keyword, "Acme Airlines");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("acme"), "Acme");
        assert_eq!(title_case("ACME AIR"), "Acme Air");
        assert_eq!(title_case("a-b c"), "A-B C");
        assert_eq!(title_case(""), "");
    }
}
