use crate::dialect::{ConvertArgs, Dialect};
use crate::table::Table;
use itertools::Itertools;
use log::{debug, info};

fn explain_column(table: &Table, column: &str) -> String {
    match table.column_index(column) {
        Err(_) => format!("{column} (missing)"),
        Ok(c) => {
            let present = table.rows().iter().filter(|r| r.get(c).is_some()).count();
            format!("{column} ({present}/{} cells)", table.len())
        }
    }
}

pub fn statistics(table: &Table) {
    info!(target: "morlus", "rows: {}", table.len());
    info!(target: "morlus", "columns: {}", table.columns().len());
}

pub fn dialect_statistics(table: &Table, dialect: &Dialect) {
    debug!(
        target: "morlus",
        "character columns: {}",
        dialect
            .character_columns
            .iter()
            .map(|c| explain_column(table, c))
            .join(", ")
    );
    debug!(
        target: "morlus",
        "code column: {}",
        explain_column(table, &dialect.code_column)
    );
}

pub fn conversion(args: &ConvertArgs, input: &str, output: &str) {
    info!(
        target: "morlus",
        "{}: {} chars in, {} chars out, separator '{}'",
        args.direction,
        input.chars().count(),
        output.chars().count(),
        args.separator
    );
}
