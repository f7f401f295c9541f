pub mod converter;
pub mod dialect;
pub mod errors;
mod information;
pub mod mapping;
pub mod output;
pub mod table;
