//! Row builders shared by the unit tests

use crate::model::{GameRecord, ReviewRecord};

/// A Windows-only game released in 2015 with no playtime
pub fn game(app_id: i64, name: &str, genres: &str) -> GameRecord {
    GameRecord {
        app_id,
        name: name.to_string(),
        windows: true,
        mac: false,
        linux: false,
        genres: genres.to_string(),
        release_date: "2015-01-01".to_string(),
        avg_playtime_forever: 0.0,
        positive_count: 0,
        negative_count: 0,
    }
}

pub fn review(app_id: i64, text: &str, score: f64) -> ReviewRecord {
    ReviewRecord {
        app_id,
        review_text: text.to_string(),
        review_score: score,
    }
}

/// `count` reviews for one game sharing text and score
pub fn reviews(app_id: i64, text: &str, score: f64, count: usize) -> Vec<ReviewRecord> {
    (0..count).map(|_| review(app_id, text, score)).collect()
}

/// One games data row: named cells set, everything else left empty.
pub fn games_line(cells: &[(&str, &str)]) -> String {
    crate::loader::GAMES_COLUMNS
        .iter()
        .map(|column| {
            cells
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| format!("\"{}\"", value.replace('"', "\"\"")))
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(",")
}
