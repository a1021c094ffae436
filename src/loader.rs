//! Dataset loading
//!
//! The games export carries no usable header, so its columns are bound by
//! position to [`GAMES_COLUMNS`]. The binding is checked against the scanned
//! row width and fails loudly instead of misaligning columns.

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{DatasetFormatError, PipelineError};
use crate::model::REVIEW_FIELDS;

/// Revision of the positional games layout below
pub const GAMES_SCHEMA_VERSION: u32 = 1;

/// Positional column names of a games data row. The eighth field has no name
/// upstream; "Unknown" keeps every later column aligned.
pub const GAMES_COLUMNS: [&str; 40] = [
    "AppID",
    "Name",
    "Release date",
    "Estimated owners",
    "Peak CCU",
    "Required age",
    "Price",
    "Unknown",
    "DiscountDLC count",
    "About the game",
    "Supported languages",
    "Full audio languages",
    "Reviews",
    "Header image",
    "Website",
    "Support url",
    "Support email",
    "Windows",
    "Mac",
    "Linux",
    "Metacritic score",
    "Metacritic url",
    "User score",
    "Positive",
    "Negative",
    "Score rank",
    "Achievements",
    "Recommendations",
    "Notes",
    "Average playtime forever",
    "Average playtime two weeks",
    "Median playtime forever",
    "Median playtime two weeks",
    "Developers",
    "Publishers",
    "Categories",
    "Genres",
    "Tags",
    "Screenshots",
    "Movies",
];

/// Cell values read as missing, matching the usual dataframe defaults
pub const MISSING_MARKERS: [&str; 17] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null",
];

/// Both inputs, schema-checked but not yet cleaned
pub struct RawDatasets {
    pub games: LazyFrame,
    pub reviews: LazyFrame,
}

pub fn load(games_path: &Path, reviews_path: &Path) -> Result<RawDatasets, PipelineError> {
    Ok(RawDatasets {
        games: load_games(games_path)?,
        reviews: load_reviews(reviews_path)?,
    })
}

/// Every cell is read as text; typing is the cleaner's job. Empty cells and
/// [`MISSING_MARKERS`] come back null.
fn scan_csv(path: &Path, has_header: bool, skip_rows: usize) -> Result<LazyFrame, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }
    Ok(LazyCsvReader::new(PlPathRef::Local(path).into_owned())
        .with_has_header(has_header)
        .with_skip_rows(skip_rows)
        .with_infer_schema_length(Some(0))
        .with_null_values(Some(NullValues::AllColumns(
            MISSING_MARKERS.iter().map(|marker| (*marker).into()).collect(),
        )))
        .finish()?)
}

/// Scan the games export, skipping its first row, and relabel the columns.
pub fn load_games(path: &Path) -> Result<LazyFrame, PipelineError> {
    let mut scan = scan_csv(path, false, 1)?;
    let schema = scan.collect_schema()?;

    if schema.len() != GAMES_COLUMNS.len() {
        return Err(DatasetFormatError::ColumnCount {
            path: path.to_path_buf(),
            schema_version: GAMES_SCHEMA_VERSION,
            expected: GAMES_COLUMNS.len(),
            found: schema.len(),
        }
        .into());
    }

    let relabeled: Vec<Expr> = schema
        .iter_names()
        .zip(GAMES_COLUMNS)
        .map(|(source, target)| col(source.clone()).alias(target))
        .collect();

    debug!(path = %path.display(), columns = relabeled.len(), "games schema bound");
    Ok(scan.select(relabeled))
}

pub fn load_reviews(path: &Path) -> Result<LazyFrame, PipelineError> {
    let mut scan = scan_csv(path, true, 0)?;
    let schema = scan.collect_schema()?;

    let missing: Vec<String> = REVIEW_FIELDS
        .iter()
        .filter(|column| !schema.contains(*column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetFormatError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        }
        .into());
    }

    debug!(path = %path.display(), columns = schema.len(), "reviews header checked");
    Ok(scan)
}
