//! Run configuration: input paths and query parameters

use std::path::PathBuf;

use crate::error::ConfigError;

/// Everything a pipeline run needs, passed explicitly to [`crate::pipeline::run`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Headerless games export (first row is skipped)
    pub games_path: PathBuf,

    /// Headered reviews export
    pub reviews_path: PathBuf,

    pub params: QueryParams,
}

impl PipelineConfig {
    pub fn new(games_path: impl Into<PathBuf>, reviews_path: impl Into<PathBuf>) -> Self {
        Self {
            games_path: games_path.into(),
            reviews_path: reviews_path.into(),
            params: QueryParams::default(),
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }
}

/// Tunables of the five queries
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    /// Genre tag selecting the indie view (Q2, Q3)
    pub indie_tag: String,

    /// Genre tag selecting the action view (Q4, Q5)
    pub action_tag: String,

    /// Substring of `release_date` used as the decade proxy (Q2)
    pub decade_marker: String,

    /// Q2 listing size
    pub top_playtime: usize,

    /// Q3 listing size
    pub top_positive: usize,

    /// Strict lower bound on negative reviews, applied before and after
    /// language filtering (Q4)
    pub negative_threshold: i64,

    /// Language code a Q4 review must be classified as
    pub target_language: String,

    /// Q4 listing size
    pub english_limit: usize,

    /// Percentile of the per-game negative count distribution (Q5)
    pub percentile: f64,

    /// Q5 listing size
    pub percentile_limit: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            indie_tag: "indie".to_string(),
            action_tag: "action".to_string(),
            decade_marker: "201".to_string(),
            top_playtime: 10,
            top_positive: 5,
            negative_threshold: 5000,
            target_language: "en".to_string(),
            english_limit: 25,
            percentile: 0.90,
            percentile_limit: 10,
        }
    }
}

impl QueryParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.percentile) {
            return Err(ConfigError::PercentileOutOfRange(self.percentile));
        }
        let limits = [
            ("top_playtime", self.top_playtime),
            ("top_positive", self.top_positive),
            ("english_limit", self.english_limit),
            ("percentile_limit", self.percentile_limit),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::ZeroLimit(name));
            }
        }
        Ok(())
    }
}
