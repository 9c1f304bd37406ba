use crate::article::{Article, Sentiment};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Column names the backing table must provide.
pub const COLUMN_KEYWORDS: &str = "Keywords";
pub const COLUMN_HEADLINE: &str = "Headline";
pub const COLUMN_DATE: &str = "Date";
pub const COLUMN_SENTIMENT: &str = "Sentiment";
pub const COLUMN_REACH: &str = "Reach";
pub const COLUMN_AVE: &str = "AVE";
pub const COLUMN_SOURCE: &str = "Source";
pub const COLUMN_INFLUENCER: &str = "Influencer";
pub const COLUMN_OPENING_TEXT: &str = "Opening Text";
pub const COLUMN_HIT_SENTENCE: &str = "Hit Sentence";

/// All required columns, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COLUMN_KEYWORDS,
    COLUMN_HEADLINE,
    COLUMN_DATE,
    COLUMN_SENTIMENT,
    COLUMN_REACH,
    COLUMN_AVE,
    COLUMN_SOURCE,
    COLUMN_INFLUENCER,
    COLUMN_OPENING_TEXT,
    COLUMN_HIT_SENTENCE,
];

/// Errors that can occur while loading the dataset.
///
/// A load failure is terminal for the engine instance that observed it; the
/// underlying cause is carried in the message so it surfaces verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Source could not be opened or read
    Io(String),
    /// Source could not be parsed into tabular form
    Parse(String),
    /// A required column is absent from the source
    MissingColumn(String),
    /// A numeric cell could not be parsed
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "Failed to read data source: {}", msg),
            LoadError::Parse(msg) => write!(f, "Failed to parse data source: {}", msg),
            LoadError::MissingColumn(column) => {
                write!(f, "Required column '{}' is missing from the source", column)
            }
            LoadError::InvalidNumber { column, row, value } => write!(
                f,
                "Invalid number '{}' in column '{}' at data row {}",
                value, column, row
            ),
        }
    }
}

impl std::error::Error for LoadError {}

/// Trait for dataset source abstraction.
///
/// The engine consumes an in-memory table of [`Article`] records and does not
/// care where it came from. Implementations can be CSV files, in-memory
/// fixtures, or any other tabular collaborator able to supply the required
/// columns.
pub trait DataSource {
    /// Reads the backing source into an ordered table of articles.
    ///
    /// Row order must be source order. Loading is all-or-nothing: either the
    /// full table is produced or a [`LoadError`] describing the failure.
    ///
    /// # Errors
    /// Returns an error if the source cannot be read, cannot be parsed into
    /// tabular form, or lacks a required column.
    fn load(&self) -> Result<Vec<Article>, LoadError>;
}

/// In-memory data source implementation for testing.
///
/// Holds a fixed table of articles; `load` hands out a copy, so the caller's
/// cached dataset never aliases the fixture.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    articles: Vec<Article>,
}

impl InMemoryDataSource {
    /// Creates a data source over a fixed article table.
    pub fn new(articles: Vec<Article>) -> Self {
        InMemoryDataSource { articles }
    }
}

impl DataSource for InMemoryDataSource {
    fn load(&self) -> Result<Vec<Article>, LoadError> {
        Ok(self.articles.clone())
    }
}

/// CSV-backed data source.
///
/// Expects a header row containing every column in [`REQUIRED_COLUMNS`]
/// (extra columns are ignored). The header is validated before any row is
/// read, so a schema problem fails fast naming the missing column rather
/// than surfacing as a row-level lookup failure.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Creates a data source reading from the given CSV file path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvDataSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvDataSource {
    fn load(&self) -> Result<Vec<Article>, LoadError> {
        let file = File::open(&self.path)
            .map_err(|e| LoadError::Io(format!("{}: {}", self.path.display(), e)))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| LoadError::Parse(e.to_string()))?
            .clone();
        let indices = column_indices(&headers)?;

        let mut articles = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let row = idx + 1;
            let record = record.map_err(|e| LoadError::Parse(e.to_string()))?;
            let field = |column: usize| record.get(indices[column]).unwrap_or("").to_string();

            articles.push(Article {
                keywords_text: field(0),
                headline: field(1),
                date: field(2),
                sentiment: Sentiment::from_literal(&field(3)),
                reach: parse_number(&field(4), COLUMN_REACH, row)?,
                ave: parse_number(&field(5), COLUMN_AVE, row)?,
                source: field(6),
                influencer: field(7),
                opening_text: field(8),
                hit_sentence: field(9),
            });
        }

        log::info!(
            "loaded {} articles from {}",
            articles.len(),
            self.path.display()
        );
        Ok(articles)
    }
}

/// Resolves the header index of every required column, in
/// [`REQUIRED_COLUMNS`] order.
fn column_indices(headers: &csv::StringRecord) -> Result<[usize; 10], LoadError> {
    let mut indices = [0usize; 10];
    for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
        indices[slot] = headers
            .iter()
            .position(|h| h.trim() == *column)
            .ok_or_else(|| LoadError::MissingColumn(column.to_string()))?;
    }
    Ok(indices)
}

/// Parses a numeric cell. Empty cells count as 0.0 (absent metrics do not
/// contribute to sums); anything else that fails to parse is a hard error
/// naming the column and row.
fn parse_number(value: &str, column: &str, row: usize) -> Result<f64, LoadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| LoadError::InvalidNumber {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
}
