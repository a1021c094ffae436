//! The five analytical queries
//!
//! Every query reads the cleaned tables and never mutates them. The indie and
//! action views are filtered once when the engine is built and shared.
//!
//! Score semantics everywhere: positive means `review_score > 0`, negative
//! means `review_score < 0`; zero scores fall in neither bucket.

use std::time::Instant;

use polars::prelude::*;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::classifier::LanguageClassifier;
use crate::config::QueryParams;
use crate::model::CleanedTables;
use crate::report::QueryResult;

/// Platform columns counted by Q1, in output order
pub const PLATFORMS: [&str; 3] = ["windows", "mac", "linux"];

pub struct QueryEngine<'a> {
    tables: &'a CleanedTables,
    params: &'a QueryParams,
    games_indie: DataFrame,
    games_action: DataFrame,
}

fn inner() -> JoinArgs {
    JoinArgs::new(JoinType::Inner)
}

fn ascending_names() -> SortMultipleOptions {
    SortMultipleOptions::default().with_maintain_order(true)
}

fn genre_view(tables: &CleanedTables, tag: &str) -> PolarsResult<DataFrame> {
    tables
        .games
        .frame()
        .clone()
        .lazy()
        .filter(col("genres").str().contains_literal(lit(tag)))
        .collect()
}

fn names(frame: &DataFrame) -> PolarsResult<Vec<String>> {
    Ok(frame
        .column("name")?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_owned)
        .collect())
}

impl<'a> QueryEngine<'a> {
    pub fn new(tables: &'a CleanedTables, params: &'a QueryParams) -> PolarsResult<Self> {
        let games_indie = genre_view(tables, &params.indie_tag)?;
        let games_action = genre_view(tables, &params.action_tag)?;
        debug!(
            indie = games_indie.height(),
            action = games_action.height(),
            "genre views built"
        );
        Ok(Self {
            tables,
            params,
            games_indie,
            games_action,
        })
    }

    fn action_games(&self) -> LazyFrame {
        self.games_action
            .clone()
            .lazy()
            .select([col("app_id"), col("name")])
    }

    /// Reviews with a strictly negative score
    fn negative_reviews(&self) -> LazyFrame {
        self.tables
            .reviews
            .frame()
            .clone()
            .lazy()
            .filter(col("review_score").lt(lit(0.0)))
    }

    /// Q1: games supporting each platform. Flags are independent.
    pub fn platform_support(&self) -> PolarsResult<QueryResult> {
        let totals = self
            .tables
            .games
            .frame()
            .clone()
            .lazy()
            .select(
                PLATFORMS
                    .iter()
                    .map(|platform| col(*platform).cast(DataType::Int64).sum().alias(*platform))
                    .collect::<Vec<_>>(),
            )
            .collect()?;

        let mut counts = Vec::with_capacity(PLATFORMS.len());
        for platform in PLATFORMS {
            let count = totals.column(platform)?.i64()?.get(0).unwrap_or(0);
            counts.push((platform.to_string(), count));
        }
        Ok(QueryResult::Counts(counts))
    }

    /// Q2: indie games released in the 2010s with the highest average
    /// playtime. The decade is a substring match on the free-text date.
    pub fn top_indie_by_playtime(&self) -> PolarsResult<QueryResult> {
        let top = self
            .games_indie
            .clone()
            .lazy()
            .filter(
                col("release_date")
                    .str()
                    .contains_literal(lit(self.params.decade_marker.as_str())),
            )
            .sort(
                ["avg_playtime_forever"],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .limit(self.params.top_playtime as IdxSize)
            .select([col("name")])
            .collect()?;

        Ok(QueryResult::Ranked(names(&top)?))
    }

    /// Q3: indie games with the most positive reviews. Groups by display
    /// name, so distinct games sharing a name are counted together.
    pub fn top_indie_by_positive_reviews(&self) -> PolarsResult<QueryResult> {
        let indicators = self.tables.reviews.frame().clone().lazy().select([
            col("app_id"),
            when(col("review_score").gt(lit(0.0)))
                .then(lit(1i64))
                .otherwise(lit(0i64))
                .alias("positive"),
        ]);

        let top = self
            .games_indie
            .clone()
            .lazy()
            .select([col("app_id"), col("name")])
            .join(indicators, [col("app_id")], [col("app_id")], inner())
            .group_by_stable([col("name")])
            .agg([col("positive").sum().alias("positive_reviews")])
            .sort(
                ["positive_reviews", "name"],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, false])
                    .with_maintain_order(true),
            )
            .limit(self.params.top_positive as IdxSize)
            .collect()?;

        Ok(QueryResult::Ranked(names(&top)?))
    }

    /// Q4: action games with more than the threshold of negative reviews,
    /// where the threshold must hold both over all negative reviews and over
    /// those classified as the target language.
    pub fn action_with_negative_target_language_reviews(
        &self,
        classifier: &dyn LanguageClassifier,
    ) -> PolarsResult<QueryResult> {
        let threshold = self.params.negative_threshold;
        let negatives = self.negative_reviews();

        let heavy = negatives
            .clone()
            .group_by_stable([col("app_id")])
            .agg([len().cast(DataType::Int64).alias("negative_reviews")])
            .filter(col("negative_reviews").gt(lit(threshold)));

        let candidates = self
            .action_games()
            .join(heavy, [col("app_id")], [col("app_id")], inner())
            .select([col("app_id"), col("name")])
            .collect()?;

        if candidates.height() == 0 {
            debug!("no action game passed the negative review threshold");
            return Ok(QueryResult::Ranked(Vec::new()));
        }

        let recovered = negatives
            .join(
                candidates.clone().lazy().select([col("app_id")]),
                [col("app_id")],
                [col("app_id")],
                inner(),
            )
            .select([col("app_id"), col("review_text")])
            .collect()?;

        let started = Instant::now();
        let mask = self.language_mask(&recovered, classifier)?;
        let matching = recovered.filter(&mask)?;
        info!(
            candidates = candidates.height(),
            classified = recovered.height(),
            matching = matching.height(),
            language = %self.params.target_language,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "negative reviews classified"
        );

        let top = matching
            .lazy()
            .group_by_stable([col("app_id")])
            .agg([len().cast(DataType::Int64).alias("negative_reviews")])
            .filter(col("negative_reviews").gt(lit(threshold)))
            .join(candidates.lazy(), [col("app_id")], [col("app_id")], inner())
            .select([col("name")])
            .sort(["name"], ascending_names())
            .limit(self.params.english_limit as IdxSize)
            .collect()?;

        Ok(QueryResult::Ranked(names(&top)?))
    }

    /// One flag per row of `reviews`: classified as the target language.
    fn language_mask(
        &self,
        reviews: &DataFrame,
        classifier: &dyn LanguageClassifier,
    ) -> PolarsResult<BooleanChunked> {
        let texts: Vec<Option<&str>> = reviews.column("review_text")?.str()?.into_iter().collect();
        let target = self.params.target_language.as_str();

        let flags: Vec<bool> = texts
            .par_iter()
            .map(|text| text.is_some_and(|text| classifier.classify(text) == target))
            .collect();

        Ok(BooleanChunked::from_slice("matches_language".into(), &flags))
    }

    /// Q5: action games at or above the configured percentile of negative
    /// review counts. Only reviews of action games enter the distribution.
    pub fn action_in_negative_percentile(&self) -> PolarsResult<QueryResult> {
        let counts = self
            .negative_reviews()
            .select([col("app_id")])
            .join(
                self.action_games().select([col("app_id")]),
                [col("app_id")],
                [col("app_id")],
                inner(),
            )
            .group_by_stable([col("app_id")])
            .agg([len().cast(DataType::Int64).alias("negative_reviews")])
            .collect()?;

        let values: Vec<f64> = counts
            .column("negative_reviews")?
            .i64()?
            .into_iter()
            .flatten()
            .map(|count| count as f64)
            .collect();

        let Some(cutoff) = linear_percentile(&values, self.params.percentile) else {
            debug!("no action game has negative reviews");
            return Ok(QueryResult::Ranked(Vec::new()));
        };
        info!(
            games = values.len(),
            percentile = self.params.percentile,
            cutoff,
            "negative review percentile"
        );

        let top = counts
            .lazy()
            .filter(
                col("negative_reviews")
                    .cast(DataType::Float64)
                    .gt_eq(lit(cutoff)),
            )
            .join(self.action_games(), [col("app_id")], [col("app_id")], inner())
            .select([col("name")])
            .sort(["name"], ascending_names())
            .limit(self.params.percentile_limit as IdxSize)
            .collect()?;

        Ok(QueryResult::Ranked(names(&top)?))
    }
}

/// Value at fraction `q` of the sorted sample, interpolating linearly between
/// the two nearest observations. `None` for an empty sample.
pub fn linear_percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
