//! Data structures for reporting conversions.

use crate::dialect::{ConvertArgs, Direction};
use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct OConversion {
    pub direction: Direction,
    pub character_columns: Vec<String>,
    pub code_column: String,
    pub separator: String,
    pub input: String,
    pub output: String,
}

impl OConversion {
    pub fn new(args: &ConvertArgs, input: &str, output: String) -> OConversion {
        OConversion {
            direction: args.direction,
            character_columns: args.dialect.character_columns.clone(),
            code_column: args.dialect.code_column.clone(),
            separator: args.separator.clone(),
            input: input.to_owned(),
            output,
        }
    }
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}

/// A short one-line preview of a possibly long text.
pub fn preview(s: &str, max_chars: usize) -> String {
    let line = s.lines().next().unwrap_or("");
    if line.chars().count() > max_chars || line.len() < s.len() {
        let head: String = line.chars().take(max_chars).collect();
        format!("{head}…")
    } else {
        line.to_owned()
    }
}
