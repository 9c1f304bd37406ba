use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-empty ordered list of alias strings standing for one logical entity
/// (e.g. a brand and its abbreviation).
///
/// Matching is case-insensitive substring containment: a group matches a
/// piece of text iff any alias, case-folded, occurs anywhere inside the
/// case-folded text. This is substring matching by design, not whole-word
/// matching — an alias that happens to be contained in a longer unrelated
/// word still matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordGroup {
    aliases: Vec<String>,
}

impl KeywordGroup {
    /// Creates a single-alias group.
    pub fn new(alias: impl Into<String>) -> Self {
        KeywordGroup {
            aliases: vec![alias.into()],
        }
    }

    /// Builds a group from a sequence of optional aliases, dropping absent
    /// entries at the boundary.
    ///
    /// # Arguments
    /// * `aliases` - Candidate aliases; `None` entries are filtered out
    ///
    /// # Errors
    /// Returns [`KeywordGroupError::Empty`] if nothing survives the filter —
    /// an entirely empty group is a caller error, not a silent no-op.
    pub fn from_aliases<I, S>(aliases: I) -> Result<Self, KeywordGroupError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let aliases: Vec<String> = aliases.into_iter().flatten().map(Into::into).collect();
        if aliases.is_empty() {
            return Err(KeywordGroupError::Empty);
        }
        Ok(KeywordGroup { aliases })
    }

    /// Returns the aliases in construction order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the primary alias (the first one).
    pub fn primary(&self) -> &str {
        &self.aliases[0]
    }

    /// Returns true if the group carries more than one alias.
    pub fn is_compound(&self) -> bool {
        self.aliases.len() > 1
    }

    /// Tests whether any alias occurs as a case-insensitive substring of
    /// `text`.
    ///
    /// Missing upstream fields arrive here as their textual stand-in (empty
    /// string or a literal like `"nan"`), which simply fails to contain any
    /// real alias; the test never panics on such input.
    pub fn matches(&self, text: &str) -> bool {
        let folded = text.to_lowercase();
        self.aliases
            .iter()
            .any(|alias| folded.contains(&alias.to_lowercase()))
    }
}

/// Errors from keyword group construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordGroupError {
    /// No aliases remained after filtering absent entries
    Empty,
}

impl fmt::Display for KeywordGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordGroupError::Empty => {
                write!(f, "keyword group has no aliases after filtering")
            }
        }
    }
}

impl std::error::Error for KeywordGroupError {}
