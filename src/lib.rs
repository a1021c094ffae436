//! Batch analytics over a game catalog and its user reviews.
//!
//! Two CSV exports are loaded, cleaned into [`model::CleanedTables`] and run
//! through five fixed queries whose results are rendered as a delimited
//! [`report::Report`].

pub mod classifier;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod queries;
pub mod report;

#[cfg(test)]
mod test_utils;

pub use classifier::{LanguageClassifier, LinguaClassifier};
pub use config::{PipelineConfig, QueryParams};
pub use error::{DatasetFormatError, PipelineError};
pub use report::{QueryResult, Report};
