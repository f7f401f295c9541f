//! The dataset table: symbol rows with named cells, loaded from tab-separated data.

use crate::errors::{self, Result};
use itertools::Itertools;
use log::{debug, info};
use std::collections::HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::io;
use std::path::Path;

/// Cell text that marks a blank cell in the source data.
pub const ABSENT: &str = "None";

/// Row index of the header in the standard dataset layout.
pub const DEFAULT_HEADER_ROW: usize = 3;

/// Number of leading metadata rows in the standard dataset layout.
pub const DEFAULT_SKIP_ROWS: usize = 4;

/// How columns get their names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnNaming {
    /// Names are taken from the raw row with this index.
    Header(usize),
    /// Names are synthesized as `COL_0`, `COL_1`, ...
    Positional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub naming: ColumnNaming,
    /// Leading raw rows discarded before the data rows start.
    pub skip_rows: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            naming: ColumnNaming::Header(DEFAULT_HEADER_ROW),
            skip_rows: DEFAULT_SKIP_ROWS,
        }
    }
}

impl LoadOptions {
    pub fn positional() -> Self {
        LoadOptions {
            naming: ColumnNaming::Positional,
            ..LoadOptions::default()
        }
    }
}

/// A cell value; `None` is the absent value.
pub type Cell = Option<String>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// The value at a column position, `None` if the cell is absent.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }
}

/// An ordered, read-only sequence of rows sharing one set of column names.
#[derive(Debug)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Row>,
}

fn normalize(cell: String) -> Cell {
    if cell.is_empty() || cell == ABSENT {
        None
    } else {
        Some(cell)
    }
}

fn positional_name(i: usize) -> String {
    format!("COL_{i}")
}

fn column_names(raw: &[Vec<String>], naming: ColumnNaming, width: usize) -> Result<Vec<String>> {
    match naming {
        ColumnNaming::Positional => Ok((0..width).map(positional_name).collect_vec()),
        ColumnNaming::Header(h) => {
            let header = raw.get(h).ok_or_else(|| {
                errors::load_error(format!(
                    "header row {h} not found, source has {} rows",
                    raw.len()
                ))
            })?;
            Ok(header
                .iter()
                .enumerate()
                .map(|(i, name)| match normalize(name.clone()) {
                    None => positional_name(i),
                    Some(name) => name,
                })
                .collect_vec())
        }
    }
}

fn build_index(columns: &[String]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (i, name) in columns.iter().enumerate() {
        match index.entry(name.clone()) {
            Occupied(e) => {
                return Err(errors::load_error(format!(
                    "duplicate column name '{name}' at positions {} and {i}",
                    e.get()
                )));
            }
            Vacant(e) => {
                e.insert(i);
            }
        }
    }
    Ok(index)
}

impl Table {
    /// Build a table from raw rows of string cells.
    ///
    /// All raw rows must have the same number of cells.
    /// The first `options.skip_rows` rows are discarded; the rest are data rows.
    pub fn load(raw: Vec<Vec<String>>, options: &LoadOptions) -> Result<Table> {
        let width = raw.first().map_or(0, Vec::len);
        if let Some((i, r)) = raw.iter().find_position(|r| r.len() != width) {
            return Err(errors::load_error(format!(
                "row {i} has {} cells, expected {width}",
                r.len()
            )));
        }
        let columns = column_names(&raw, options.naming, width)?;
        let index = build_index(&columns)?;
        let rows = raw
            .into_iter()
            .skip(options.skip_rows)
            .map(|r| Row {
                cells: r.into_iter().map(normalize).collect_vec(),
            })
            .collect_vec();
        debug!(target: "morlus", "columns: {}", columns.join(", "));
        info!(target: "morlus", "loaded {} rows, {} columns", rows.len(), columns.len());
        Ok(Table {
            columns,
            index,
            rows,
        })
    }

    pub fn from_reader<R: io::Read>(reader: R, options: &LoadOptions) -> Result<Table> {
        Table::load(read_tsv(reader)?, options)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Table> {
        let path = path.as_ref();
        info!(target: "morlus", "read: {}", path.display());
        let file = std::fs::File::open(path)
            .map_err(|e| errors::load_error(format!("{}: {e}", path.display())))?;
        Table::from_reader(file, options)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| errors::unknown_column(name))
    }

    /// The value of a named column in the given row.
    pub fn value(&self, row: usize, name: &str) -> Result<Option<&str>> {
        let column = self.column_index(name)?;
        Ok(self.rows.get(row).and_then(|r| r.get(column)))
    }
}

/// Read tab-separated rows. Cells are literal: no quoting, no escapes.
pub fn read_tsv<R: io::Read>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);
    let mut rows = vec![];
    for record in reader.records() {
        let record = record.map_err(|e| errors::load_error(format!("{e}")))?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_owned).collect_vec());
    }
    Ok(rows)
}
