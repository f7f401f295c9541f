//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// The dataset could not be read or is malformed.
#[derive(Debug)]
pub struct LoadError(pub String);

/// A conversion was requested before any dataset was loaded.
#[derive(Debug)]
pub struct NoTableLoaded;

/// A column name that the loaded dataset does not have.
#[derive(Debug)]
pub struct UnknownColumn(pub String);

/// Invalid command line argument or configuration value.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot load dataset: {}", self.0)
    }
}

impl fmt::Display for NoTableLoaded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "no dataset loaded")
    }
}

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown column: '{}'", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl error::Error for LoadError {}

impl error::Error for NoTableLoaded {}

impl error::Error for UnknownColumn {}

impl error::Error for InvalidArgument {}

/// A helper for constructing [LoadError].
pub fn load_error(s: String) -> Box<dyn error::Error> {
    LoadError(s).into()
}

/// A helper for constructing [UnknownColumn].
pub fn unknown_column(column: &str) -> Box<dyn error::Error> {
    UnknownColumn(column.to_owned()).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument_ref(s: &str) -> Box<dyn error::Error> {
    InvalidArgument(s.to_owned()).into()
}
