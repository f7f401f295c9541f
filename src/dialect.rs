//! Conversion settings: which columns to use, which way to convert, how to separate codes.

use crate::errors::{self, InvalidArgument, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::{fmt, fs};

/// Two full-width exclamation marks and a space; unlikely to appear in ordinary text.
pub const DEFAULT_SEPARATOR: &str = "！！ ";

const US_COLUMNS: [&str; 5] = [
    "colm1_US_number_key",
    "colm2_US_upper_key",
    "colm3_US_lower_key",
    "colm4_US_symbol_key",
    "colm5_US_prosign_key",
];

const JP_COLUMNS: [&str; 6] = [
    "colm7_JP_number_key",
    "colm8_JP_upper_key",
    "colm9_JP_lower_key",
    "colm10_JP_overlapsymbol_key",
    "colm11_JP_symbol_key",
    "colm14_JP_prosign_key",
];

const HIRAGANA_COLUMN: &str = "colm12_JP_hiragana_key";
const KATAKANA_COLUMN: &str = "colm13_JP_katakana_key";
const V7_COLUMN: &str = "colm18_value_v7morlus";
const MORSE_COLUMN: &str = "colm16_value_standardmorlus";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Plain text to codes.
    #[default]
    ToCode,
    /// Codes to plain text.
    ToText,
}

/// Language of the plain text side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Jp,
    Us,
}

/// Code standard on the code side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeType {
    #[default]
    V7,
    Morse,
}

/// Which kana column is used for Japanese text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KanaPreference {
    #[default]
    Hiragana,
    Katakana,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::ToCode => write!(f, "to_code"),
            Direction::ToText => write!(f, "to_text"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::Jp => write!(f, "jp"),
            Language::Us => write!(f, "us"),
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodeType::V7 => write!(f, "v7"),
            CodeType::Morse => write!(f, "morse"),
        }
    }
}

impl fmt::Display for KanaPreference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KanaPreference::Hiragana => write!(f, "hiragana"),
            KanaPreference::Katakana => write!(f, "katakana"),
        }
    }
}

fn unexpected(what: &str, s: &str, expected: &str) -> InvalidArgument {
    InvalidArgument(format!("{what} should be {expected}, got '{s}'"))
}

impl FromStr for Direction {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "to_code" => Ok(Direction::ToCode),
            "to_text" => Ok(Direction::ToText),
            _ => Err(unexpected("direction", s, "'to_code' or 'to_text'")),
        }
    }
}

impl FromStr for Language {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "jp" => Ok(Language::Jp),
            "us" => Ok(Language::Us),
            _ => Err(unexpected("language", s, "'jp' or 'us'")),
        }
    }
}

impl FromStr for CodeType {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "v7" => Ok(CodeType::V7),
            "morse" => Ok(CodeType::Morse),
            _ => Err(unexpected("code type", s, "'v7' or 'morse'")),
        }
    }
}

impl FromStr for KanaPreference {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hiragana" => Ok(KanaPreference::Hiragana),
            "katakana" => Ok(KanaPreference::Katakana),
            _ => Err(unexpected("kana preference", s, "'hiragana' or 'katakana'")),
        }
    }
}

/// A set of character columns and one code column.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dialect {
    /// Scanned in this order; later columns win collisions within a row.
    pub character_columns: Vec<String>,
    pub code_column: String,
}

impl Dialect {
    /// One of the built-in language and code combinations.
    pub fn preset(language: Language, code_type: CodeType, kana: KanaPreference) -> Dialect {
        let character_columns: Vec<String> = match language {
            Language::Us => US_COLUMNS.iter().map(|&c| c.to_owned()).collect(),
            Language::Jp => {
                let kana = match kana {
                    KanaPreference::Hiragana => HIRAGANA_COLUMN,
                    KanaPreference::Katakana => KATAKANA_COLUMN,
                };
                JP_COLUMNS
                    .iter()
                    .chain([kana].iter())
                    .map(|&c| c.to_owned())
                    .collect()
            }
        };
        let code_column = match code_type {
            CodeType::V7 => V7_COLUMN,
            CodeType::Morse => MORSE_COLUMN,
        };
        Dialect {
            character_columns,
            code_column: code_column.to_owned(),
        }
    }

    /// Read a dialect from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dialect> {
        let data = fs::read_to_string(path)?;
        let dialect: Dialect = serde_json::from_str(&data)?;
        dialect.validate()?;
        Ok(dialect)
    }

    pub fn validate(&self) -> Result<()> {
        if self.character_columns.is_empty() {
            return Err(errors::invalid_argument_ref(
                "at least one character column is required",
            ));
        }
        if self.code_column.is_empty() {
            return Err(errors::invalid_argument_ref("code column name is empty"));
        }
        Ok(())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::preset(
            Language::default(),
            CodeType::default(),
            KanaPreference::default(),
        )
    }
}

/// Everything a single conversion needs besides the input text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConvertArgs {
    pub dialect: Dialect,
    pub direction: Direction,
    pub separator: String,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        ConvertArgs {
            dialect: Dialect::default(),
            direction: Direction::default(),
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn preset_us() {
        let d = Dialect::preset(Language::Us, CodeType::Morse, KanaPreference::Katakana);
        assert_eq!(d.character_columns, US_COLUMNS);
        assert_eq!(d.code_column, "colm16_value_standardmorlus");
    }

    #[test]
    fn preset_jp_kana_last() {
        let d = Dialect::preset(Language::Jp, CodeType::V7, KanaPreference::Katakana);
        assert_eq!(d.character_columns.len(), 7);
        assert_eq!(d.character_columns[..6], JP_COLUMNS);
        assert_eq!(d.character_columns[6], "colm13_JP_katakana_key");
        assert_eq!(d.code_column, "colm18_value_v7morlus");
        assert_eq!(
            Dialect::default().character_columns[6],
            "colm12_JP_hiragana_key"
        );
    }

    #[test]
    fn parse_settings() {
        assert_eq!("to_text".parse::<Direction>().unwrap(), Direction::ToText);
        assert_eq!("us".parse::<Language>().unwrap(), Language::Us);
        assert_eq!("morse".parse::<CodeType>().unwrap(), CodeType::Morse);
        assert_eq!(
            "katakana".parse::<KanaPreference>().unwrap(),
            KanaPreference::Katakana
        );
        assert!("both".parse::<Direction>().is_err());
        assert!("JP".parse::<Language>().is_err());
    }

    #[test]
    fn dialect_json() {
        let d: Dialect = serde_json::from_str(
            r#"{"character_columns": ["upper", "lower"], "code_column": "code"}"#,
        )
        .unwrap();
        assert_eq!(d.character_columns, ["upper", "lower"]);
        assert!(d.validate().is_ok());
        let d = Dialect {
            character_columns: vec![],
            code_column: "code".to_owned(),
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn direction_json() {
        assert_eq!(
            serde_json::to_string(&Direction::ToCode).unwrap(),
            r#""to_code""#
        );
    }
}
