//! Building lookup tables from the dataset and transcoding text with them.

use crate::errors::Result;
use crate::table::Table;
use itertools::Itertools;
use log::debug;
use std::collections::HashMap;

/// A lookup table from source units to target units.
pub type Mapping = HashMap<String, String>;

/// All (character, code) pairs in scan order: rows in table order,
/// and within a row the character columns in the given order.
/// Pairs with an absent character or an absent code are skipped.
fn pairs<'a, S: AsRef<str>>(
    table: &'a Table,
    character_columns: &[S],
    code_column: &str,
) -> Result<Vec<(&'a str, &'a str)>> {
    let code = table.column_index(code_column)?;
    let columns = character_columns
        .iter()
        .map(|c| table.column_index(c.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let columns = &columns;
    Ok(table
        .rows()
        .iter()
        .flat_map(move |row| {
            columns
                .iter()
                .filter_map(move |&c| Some((row.get(c)?, row.get(code)?)))
        })
        .collect_vec())
}

fn fold_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Mapping {
    let mut overwritten = 0;
    let mapping = pairs.fold(Mapping::new(), |mut mapping, (key, value)| {
        if let Some(old) = mapping.insert(key.to_owned(), value.to_owned()) {
            if old != value {
                overwritten += 1;
            }
        }
        mapping
    });
    debug!(target: "morlus", "mapping: {} entries, {} overwritten", mapping.len(), overwritten);
    mapping
}

/// Build a character → code mapping.
///
/// Later pairs in scan order replace earlier ones for the same character.
pub fn build_mapping<S: AsRef<str>>(
    table: &Table,
    character_columns: &[S],
    code_column: &str,
) -> Result<Mapping> {
    let pairs = pairs(table, character_columns, code_column)?;
    Ok(fold_pairs(pairs.into_iter()))
}

/// Build a code → character mapping, with the same scan order and precedence as [build_mapping].
pub fn build_reverse_mapping<S: AsRef<str>>(
    table: &Table,
    character_columns: &[S],
    code_column: &str,
) -> Result<Mapping> {
    let pairs = pairs(table, character_columns, code_column)?;
    Ok(fold_pairs(pairs.into_iter().map(|(ch, code)| (code, ch))))
}

/// Replace each character of `input` by its code and join all pieces with `separator`.
///
/// Characters without a code are kept as they are, and still separated.
pub fn encode(input: &str, mapping: &Mapping, separator: &str) -> String {
    input
        .chars()
        .map(|ch| {
            let ch = ch.to_string();
            match mapping.get(&ch) {
                Some(code) => code.clone(),
                None => ch,
            }
        })
        .join(separator)
}

/// Split `input` at every occurrence of `separator`, replace each part by its
/// character and concatenate the results.
///
/// Parts without a character are kept as they are. Empty parts at either end
/// are kept. An empty separator splits between characters.
pub fn decode(input: &str, mapping: &Mapping, separator: &str) -> String {
    let lookup = |part: &str| match mapping.get(part) {
        Some(ch) => ch.clone(),
        None => part.to_owned(),
    };
    if separator.is_empty() {
        input.chars().map(|ch| lookup(&ch.to_string())).collect()
    } else {
        input.split(separator).map(lookup).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::UnknownColumn;
    use crate::table::LoadOptions;

    fn table(rows: &[&[&str]]) -> Table {
        let mut raw = vec![vec![String::new(); rows[0].len()]; 3];
        raw.extend(
            rows.iter()
                .map(|r| r.iter().map(|&c| c.to_owned()).collect_vec()),
        );
        Table::load(raw, &LoadOptions::default()).unwrap()
    }

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    fn sample() -> Table {
        table(&[
            &["upper", "lower", "code"],
            &["A", "a", ".-"],
            &["B", "b", "-..."],
            &["C", "", "-.-."],
            &["D", "d", ""],
            &["", "", "..."],
        ])
    }

    #[test]
    fn build_mapping_basic() {
        let m = build_mapping(&sample(), &["upper", "lower"], "code").unwrap();
        assert_eq!(
            m,
            mapping(&[
                ("A", ".-"),
                ("a", ".-"),
                ("B", "-..."),
                ("b", "-..."),
                ("C", "-.-."),
            ])
        );
    }

    #[test]
    fn build_mapping_skips_absent() {
        let m = build_mapping(&sample(), &["upper", "lower"], "code").unwrap();
        assert!(!m.contains_key("D"));
        assert!(!m.contains_key("d"));
        assert!(!m.contains_key("None"));
        assert!(!m.values().any(|v| v == "None" || v.is_empty()));
        let r = build_reverse_mapping(&sample(), &["upper", "lower"], "code").unwrap();
        assert!(!r.contains_key("..."));
        assert!(!r.contains_key("None"));
    }

    #[test]
    fn build_reverse_mapping_same_row_order() {
        let r = build_reverse_mapping(&sample(), &["upper", "lower"], "code").unwrap();
        assert_eq!(r[".-"], "a");
        assert_eq!(r["-.-."], "C");
        let r = build_reverse_mapping(&sample(), &["lower", "upper"], "code").unwrap();
        assert_eq!(r[".-"], "A");
    }

    #[test]
    fn build_mapping_last_row_wins() {
        let t = table(&[
            &["char", "code"],
            &["A", "1"],
            &["B", "2"],
            &["A", "3"],
            &["C", "2"],
        ]);
        let m = build_mapping(&t, &["char"], "code").unwrap();
        assert_eq!(m["A"], "3");
        let r = build_reverse_mapping(&t, &["char"], "code").unwrap();
        assert_eq!(r["2"], "C");
        assert_eq!(r["1"], "A");
    }

    #[test]
    fn build_mapping_row_order_beats_column_order() {
        let t = table(&[
            &["first", "second", "code"],
            &["", "X", "1"],
            &["X", "", "2"],
        ]);
        let m = build_mapping(&t, &["first", "second"], "code").unwrap();
        assert_eq!(m["X"], "2");
    }

    #[test]
    fn build_mapping_unknown_column() {
        let e = build_mapping(&sample(), &["upper", "kana"], "code").unwrap_err();
        assert!(e.downcast_ref::<UnknownColumn>().is_some());
        let e = build_reverse_mapping(&sample(), &["upper"], "morse").unwrap_err();
        assert!(e.downcast_ref::<UnknownColumn>().is_some());
    }

    #[test]
    fn encode_basic() {
        let m = mapping(&[("A", "1"), ("B", "2")]);
        assert_eq!(encode("AB", &m, "-"), "1-2");
        assert_eq!(encode("AB", &m, ""), "12");
        assert_eq!(encode("", &m, "-"), "");
        assert_eq!(encode("A", &m, "-"), "1");
    }

    #[test]
    fn encode_pass_through() {
        let m = mapping(&[("A", "1")]);
        assert_eq!(encode("xyz", &m, "/"), "x/y/z");
        assert_eq!(encode("A A", &m, "/"), "1/ /1");
        assert_eq!(encode("いA", &m, "！！ "), "い！！ 1");
    }

    #[test]
    fn encode_multi_char_keys_never_match() {
        let m = mapping(&[("AR", ".-.-.")]);
        assert_eq!(encode("AR", &m, " "), "A R");
    }

    #[test]
    fn decode_basic() {
        let m = mapping(&[("1", "A"), ("2", "B")]);
        assert_eq!(decode("1-2", &m, "-"), "AB");
        assert_eq!(decode("", &m, "-"), "");
        assert_eq!(decode("1-x-2", &m, "-"), "AxB");
    }

    #[test]
    fn decode_keeps_empty_edge_parts() {
        let m = mapping(&[("1", "A"), ("", "?")]);
        assert_eq!(decode("-1-", &m, "-"), "?A?");
        let m = mapping(&[("1", "A")]);
        assert_eq!(decode("-1-", &m, "-"), "A");
    }

    #[test]
    fn decode_empty_separator() {
        let m = mapping(&[("1", "A")]);
        assert_eq!(decode("12", &m, ""), "A2");
        let m = mapping(&[("12", "A")]);
        assert_eq!(decode("12", &m, ""), "12");
    }

    #[test]
    fn round_trip() {
        let t = sample();
        let m = build_mapping(&t, &["upper"], "code").unwrap();
        let r = build_reverse_mapping(&t, &["upper"], "code").unwrap();
        for s in ["A", "B", "C", "ABC", "CAB"] {
            assert_eq!(decode(&encode(s, &m, " "), &r, " "), s);
        }
    }
}
