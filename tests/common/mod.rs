//! CSV fixtures for end-to-end runs

use std::path::PathBuf;

use review_analytics::loader::GAMES_COLUMNS;
use tempfile::TempDir;

pub const REVIEWS_HEADER: &str = "app_id,app_name,review_text,review_score,review_votes";

/// Games row as exported upstream: named cells set, the rest empty.
pub fn games_line(cells: &[(&str, &str)]) -> String {
    GAMES_COLUMNS
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

pub struct GameRow<'a> {
    pub app_id: &'a str,
    pub name: &'a str,
    pub genres: &'a str,
    pub release_date: &'a str,
    pub platforms: [bool; 3],
    pub playtime: &'a str,
}

impl GameRow<'_> {
    pub fn line(&self) -> String {
        let flag = |supported: bool| if supported { "True" } else { "False" };
        games_line(&[
            ("AppID", self.app_id),
            ("Name", self.name),
            ("Release date", self.release_date),
            ("Windows", flag(self.platforms[0])),
            ("Mac", flag(self.platforms[1])),
            ("Linux", flag(self.platforms[2])),
            ("Positive", "0"),
            ("Negative", "0"),
            ("Average playtime forever", self.playtime),
            ("Genres", self.genres),
            ("Developers", "Someone"),
        ])
    }
}

pub fn review_line(app_id: &str, text: &str, score: &str) -> String {
    format!("{app_id},Game,\"{}\",{score},0", text.replace('"', "\"\""))
}

pub struct Fixture {
    pub dir: TempDir,
    pub games: PathBuf,
    pub reviews: PathBuf,
}

/// Writes both files; the games file gets the throwaway first row.
pub fn fixture(game_lines: &[String], review_lines: &[String]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let games = dir.path().join("games.csv");
    let reviews = dir.path().join("reviews.csv");

    let mut games_text = String::from("AppID,Name,Release date,Estimated owners\n");
    for line in game_lines {
        games_text.push_str(line);
        games_text.push('\n');
    }
    std::fs::write(&games, games_text).unwrap();

    let mut reviews_text = format!("{REVIEWS_HEADER}\n");
    for line in review_lines {
        reviews_text.push_str(line);
        reviews_text.push('\n');
    }
    std::fs::write(&reviews, reviews_text).unwrap();

    Fixture {
        dir,
        games,
        reviews,
    }
}
