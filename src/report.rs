//! Report rendering and parsing
//!
//! Each query becomes a block:
//!
//! ```text
//! ===========
//! Query 1:
//! ===========
//! windows: 3
//! ```
//!
//! Count lines are `label: value`, ranked lines `rank: name` from 1.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

pub const DELIMITER: &str = "===========";

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Labelled totals, printed in order
    Counts(Vec<(String, i64)>),
    /// Names in rank order; rank 1 first
    Ranked(Vec<String>),
}

impl QueryResult {
    pub fn lines(&self) -> Vec<String> {
        match self {
            QueryResult::Counts(counts) => counts
                .iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect(),
            QueryResult::Ranked(names) => names
                .iter()
                .enumerate()
                .map(|(i, name)| format!("{}: {name}", i + 1))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub label: String,
    pub result: QueryResult,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn push(&mut self, label: impl Into<String>, result: QueryResult) {
        self.sections.push(ReportSection {
            label: label.into(),
            result,
        });
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{DELIMITER}")?;
            writeln!(f, "{}:", section.label)?;
            writeln!(f, "{DELIMITER}")?;
            for line in section.result.lines() {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    write!(out, "{report}")?;
    out.flush()
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("report must start with a delimiter line")]
    MissingDelimiter,

    #[error("block starting at line {0} has no label")]
    MissingLabel(usize),
}

/// Read a rendered report back into label -> result lines.
pub fn parse_report(text: &str) -> Result<BTreeMap<String, Vec<String>>, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.first().map(|line| line.trim_end()) != Some(DELIMITER) {
        return Err(ParseError::MissingDelimiter);
    }

    let mut blocks = BTreeMap::new();
    let mut i = 0;
    while i < lines.len() {
        let label = lines
            .get(i + 1)
            .map(|line| line.trim_end())
            .ok_or(ParseError::MissingLabel(i + 1))?;
        let label = label.strip_suffix(':').unwrap_or(label).to_string();
        i += 3;

        let mut body = Vec::new();
        while i < lines.len() && lines[i] != DELIMITER {
            body.push(lines[i].to_string());
            i += 1;
        }
        blocks.insert(label, body);
    }
    Ok(blocks)
}
