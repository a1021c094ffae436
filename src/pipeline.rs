//! Load, clean, query, report

use std::time::Instant;

use polars::prelude::PolarsResult;
use tracing::info;

use crate::classifier::LanguageClassifier;
use crate::cleaner;
use crate::config::{PipelineConfig, QueryParams};
use crate::error::PipelineError;
use crate::loader;
use crate::model::CleanedTables;
use crate::queries::QueryEngine;
use crate::report::{QueryResult, Report};

/// Run the whole batch. Nothing is rendered unless every query succeeds.
pub fn run(
    config: &PipelineConfig,
    classifier: &dyn LanguageClassifier,
) -> Result<Report, PipelineError> {
    config.params.validate()?;

    let started = Instant::now();
    let raw = loader::load(&config.games_path, &config.reviews_path)?;
    let tables = cleaner::clean(raw)?;
    info!(
        games = tables.games.len(),
        reviews = tables.reviews.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "datasets loaded and cleaned"
    );

    execute(&tables, &config.params, classifier)
}

/// Run the five queries, in order, over already cleaned tables.
pub fn execute(
    tables: &CleanedTables,
    params: &QueryParams,
    classifier: &dyn LanguageClassifier,
) -> Result<Report, PipelineError> {
    let engine = QueryEngine::new(tables, params)?;

    let mut report = Report::default();
    report.push("Query 1", timed("Query 1", || engine.platform_support())?);
    report.push("Query 2", timed("Query 2", || engine.top_indie_by_playtime())?);
    report.push(
        "Query 3",
        timed("Query 3", || engine.top_indie_by_positive_reviews())?,
    );
    report.push(
        "Query 4",
        timed("Query 4", || {
            engine.action_with_negative_target_language_reviews(classifier)
        })?,
    );
    report.push(
        "Query 5",
        timed("Query 5", || engine.action_in_negative_percentile())?,
    );
    Ok(report)
}

fn timed<F>(label: &str, query: F) -> PolarsResult<QueryResult>
where
    F: FnOnce() -> PolarsResult<QueryResult>,
{
    let started = Instant::now();
    let result = query()?;
    info!(
        query = label,
        lines = result.lines().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "query finished"
    );
    Ok(result)
}
