//! Projection, typing and null-row removal for both datasets

use polars::prelude::*;
use tracing::debug;

use crate::loader::RawDatasets;
use crate::model::{CleanedTables, GamesTable, ReviewsTable};

pub fn clean(raw: RawDatasets) -> PolarsResult<CleanedTables> {
    Ok(CleanedTables {
        games: clean_games(raw.games)?,
        reviews: clean_reviews(raw.reviews)?,
    })
}

/// "True"/"true"/"TRUE" are true, anything else false, null stays null.
fn platform_flag(column: &str) -> Expr {
    col(column).str().to_lowercase().eq(lit("true"))
}

/// Expects the positional labels bound by the loader.
pub fn clean_games(raw: LazyFrame) -> PolarsResult<GamesTable> {
    let projected = raw
        .select([
            col("AppID").cast(DataType::Int64).alias("app_id"),
            col("Name").alias("name"),
            platform_flag("Windows").alias("windows"),
            platform_flag("Mac").alias("mac"),
            platform_flag("Linux").alias("linux"),
            col("Genres").str().to_lowercase().alias("genres"),
            col("Release date").alias("release_date"),
            col("Average playtime forever")
                .cast(DataType::Float64)
                .alias("avg_playtime_forever"),
            col("Positive").cast(DataType::Int64).alias("positive_count"),
            col("Negative").cast(DataType::Int64).alias("negative_count"),
        ])
        .collect()?;

    let cleaned = projected
        .clone()
        .lazy()
        .drop_nulls(None)
        .filter(col("avg_playtime_forever").is_not_nan())
        .filter(col("app_id").is_first_distinct())
        .collect()?;

    debug!(
        rows = cleaned.height(),
        dropped = projected.height() - cleaned.height(),
        "games cleaned"
    );
    Ok(GamesTable::from_frame(cleaned))
}

pub fn clean_reviews(raw: LazyFrame) -> PolarsResult<ReviewsTable> {
    let projected = raw
        .select([
            col("app_id").cast(DataType::Int64),
            col("review_text").cast(DataType::String),
            col("review_score").cast(DataType::Float64),
        ])
        .collect()?;

    let cleaned = projected
        .clone()
        .lazy()
        .drop_nulls(None)
        .filter(col("review_score").is_not_nan())
        .collect()?;

    debug!(
        rows = cleaned.height(),
        dropped = projected.height() - cleaned.height(),
        "reviews cleaned"
    );
    Ok(ReviewsTable::from_frame(cleaned))
}
