//! Typed rows and the cleaned tables that hold them

use polars::prelude::*;

/// Columns of the cleaned games table, in order
pub const GAME_FIELDS: [&str; 10] = [
    "app_id",
    "name",
    "windows",
    "mac",
    "linux",
    "genres",
    "release_date",
    "avg_playtime_forever",
    "positive_count",
    "negative_count",
];

/// Columns of the cleaned reviews table, in order
pub const REVIEW_FIELDS: [&str; 3] = ["app_id", "review_text", "review_score"];

/// One cleaned row of the games table. `genres` is lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub app_id: i64,
    pub name: String,
    pub windows: bool,
    pub mac: bool,
    pub linux: bool,
    pub genres: String,
    pub release_date: String,
    pub avg_playtime_forever: f64,
    pub positive_count: i64,
    pub negative_count: i64,
}

/// One cleaned row of the reviews table. Only the sign of `review_score` matters.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub app_id: i64,
    pub review_text: String,
    pub review_score: f64,
}

/// Cleaned games: no nulls, unique `app_id`, source order preserved.
#[derive(Debug, Clone)]
pub struct GamesTable(DataFrame);

impl GamesTable {
    pub(crate) fn from_frame(frame: DataFrame) -> Self {
        Self(frame)
    }

    /// Build a table from rows that are already clean.
    pub fn from_records(records: &[GameRecord]) -> PolarsResult<Self> {
        let frame = df!(
            "app_id" => records.iter().map(|r| r.app_id).collect::<Vec<_>>(),
            "name" => records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            "windows" => records.iter().map(|r| r.windows).collect::<Vec<_>>(),
            "mac" => records.iter().map(|r| r.mac).collect::<Vec<_>>(),
            "linux" => records.iter().map(|r| r.linux).collect::<Vec<_>>(),
            "genres" => records.iter().map(|r| r.genres.as_str()).collect::<Vec<_>>(),
            "release_date" => records.iter().map(|r| r.release_date.as_str()).collect::<Vec<_>>(),
            "avg_playtime_forever" => records.iter().map(|r| r.avg_playtime_forever).collect::<Vec<_>>(),
            "positive_count" => records.iter().map(|r| r.positive_count).collect::<Vec<_>>(),
            "negative_count" => records.iter().map(|r| r.negative_count).collect::<Vec<_>>(),
        )?;
        Ok(Self(frame))
    }

    pub fn frame(&self) -> &DataFrame {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.height()
    }

    pub fn is_empty(&self) -> bool {
        self.0.height() == 0
    }

    pub fn records(&self) -> PolarsResult<Vec<GameRecord>> {
        let df = &self.0;
        let app_id = df.column("app_id")?.i64()?;
        let name = df.column("name")?.str()?;
        let windows = df.column("windows")?.bool()?;
        let mac = df.column("mac")?.bool()?;
        let linux = df.column("linux")?.bool()?;
        let genres = df.column("genres")?.str()?;
        let release_date = df.column("release_date")?.str()?;
        let playtime = df.column("avg_playtime_forever")?.f64()?;
        let positive = df.column("positive_count")?.i64()?;
        let negative = df.column("negative_count")?.i64()?;

        Ok((0..df.height())
            .map(|i| GameRecord {
                app_id: app_id.get(i).unwrap_or_default(),
                name: name.get(i).unwrap_or_default().to_string(),
                windows: windows.get(i).unwrap_or_default(),
                mac: mac.get(i).unwrap_or_default(),
                linux: linux.get(i).unwrap_or_default(),
                genres: genres.get(i).unwrap_or_default().to_string(),
                release_date: release_date.get(i).unwrap_or_default().to_string(),
                avg_playtime_forever: playtime.get(i).unwrap_or_default(),
                positive_count: positive.get(i).unwrap_or_default(),
                negative_count: negative.get(i).unwrap_or_default(),
            })
            .collect())
    }
}

/// Cleaned reviews: no nulls, text always a string, source order preserved.
#[derive(Debug, Clone)]
pub struct ReviewsTable(DataFrame);

impl ReviewsTable {
    pub(crate) fn from_frame(frame: DataFrame) -> Self {
        Self(frame)
    }

    pub fn from_records(records: &[ReviewRecord]) -> PolarsResult<Self> {
        let frame = df!(
            "app_id" => records.iter().map(|r| r.app_id).collect::<Vec<_>>(),
            "review_text" => records.iter().map(|r| r.review_text.as_str()).collect::<Vec<_>>(),
            "review_score" => records.iter().map(|r| r.review_score).collect::<Vec<_>>(),
        )?;
        Ok(Self(frame))
    }

    pub fn frame(&self) -> &DataFrame {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.height()
    }

    pub fn is_empty(&self) -> bool {
        self.0.height() == 0
    }

    pub fn records(&self) -> PolarsResult<Vec<ReviewRecord>> {
        let df = &self.0;
        let app_id = df.column("app_id")?.i64()?;
        let text = df.column("review_text")?.str()?;
        let score = df.column("review_score")?.f64()?;

        Ok((0..df.height())
            .map(|i| ReviewRecord {
                app_id: app_id.get(i).unwrap_or_default(),
                review_text: text.get(i).unwrap_or_default().to_string(),
                review_score: score.get(i).unwrap_or_default(),
            })
            .collect())
    }
}

/// Output of the cleaner; the query engine only reads it.
#[derive(Debug, Clone)]
pub struct CleanedTables {
    pub games: GamesTable,
    pub reviews: ReviewsTable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{game, review};

    #[test]
    fn test_games_records_survive_the_frame() {
        let rows = vec![game(1, "Indiana", "indie,platformer"), game(2, "Blaster", "action")];
        let table = GamesTable::from_records(&rows).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.frame().get_column_names_str(),
            GAME_FIELDS.to_vec()
        );
        assert_eq!(table.records().unwrap(), rows);
    }

    #[test]
    fn test_reviews_records_survive_the_frame() {
        let rows = vec![
            review(7, "great", 1.0),
            review(7, "12345", -1.0),
        ];
        let table = ReviewsTable::from_records(&rows).unwrap();

        assert_eq!(table.frame().get_column_names_str(), REVIEW_FIELDS.to_vec());
        assert_eq!(table.records().unwrap(), rows);
    }

    #[test]
    fn test_empty_tables() {
        let games = GamesTable::from_records(&[]).unwrap();
        let reviews = ReviewsTable::from_records(&[]).unwrap();
        assert!(games.is_empty());
        assert!(reviews.is_empty());
        assert!(games.records().unwrap().is_empty());
    }
}
