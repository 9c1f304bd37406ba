//! Media-mentions analytics engine.
//!
//! Ingests a tabular media-mentions dataset (one row per published article)
//! and computes derived analytics keyed by groups of alias keywords:
//! coverage counts, sentiment tallies, daily trends, top-N leaderboards, and
//! weighted prominence scores. Chart rendering and spreadsheet handling live
//! outside this crate; it consumes an in-memory table from a [`DataSource`]
//! and produces already-sorted, already-labeled tables and scalars.

pub mod article;
pub mod config;
pub mod coverage;
pub mod dataset;
pub mod engine;
pub mod keyword;
pub mod prominence;
pub mod ranking;
pub mod trend;


pub use article::{Article, Sentiment};
pub use config::{Config, ConfigError};
pub use coverage::{SentimentCounts, SentimentOverviewRow};
pub use dataset::{CsvDataSource, DataSource, InMemoryDataSource, LoadError};
pub use engine::{AnalyticsEngine, DateHandling, QueryError};
pub use keyword::{KeywordGroup, KeywordGroupError};
pub use prominence::{KeywordProminence, ProminenceRow, ProminenceTable};
pub use ranking::{RankField, RankedEntry, DEFAULT_TOP_N};
pub use trend::TrendPoint;
