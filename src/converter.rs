//! A conversion session that owns the loaded dataset.

use crate::dialect::{ConvertArgs, Direction};
use crate::errors::{NoTableLoaded, Result};
use crate::information;
use crate::mapping;
use crate::table::{LoadOptions, Table};
use std::path::Path;

/// Holds at most one dataset; every conversion builds a fresh mapping from it.
#[derive(Debug, Default)]
pub struct Converter {
    table: Option<Table>,
}

impl Converter {
    pub fn new() -> Converter {
        Converter { table: None }
    }

    pub fn with_table(table: Table) -> Converter {
        Converter { table: Some(table) }
    }

    /// Replace the current dataset.
    pub fn load(&mut self, table: Table) {
        information::statistics(&table);
        self.table = Some(table);
    }

    /// Read and replace the current dataset.
    /// If reading fails, the previous dataset stays in place.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P, options: &LoadOptions) -> Result<()> {
        let table = Table::from_path(path, options)?;
        self.load(table);
        Ok(())
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn convert(&self, args: &ConvertArgs, input: &str) -> Result<String> {
        let table = self.table.as_ref().ok_or(NoTableLoaded)?;
        args.dialect.validate()?;
        information::dialect_statistics(table, &args.dialect);
        let dialect = &args.dialect;
        let output = match args.direction {
            Direction::ToCode => {
                let m = mapping::build_mapping(
                    table,
                    &dialect.character_columns,
                    &dialect.code_column,
                )?;
                mapping::encode(input, &m, &args.separator)
            }
            Direction::ToText => {
                let m = mapping::build_reverse_mapping(
                    table,
                    &dialect.character_columns,
                    &dialect.code_column,
                )?;
                mapping::decode(input, &m, &args.separator)
            }
        };
        information::conversion(args, input, &output);
        Ok(output)
    }
}
