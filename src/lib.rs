//! # hygdb - HYG star catalog to SQLite
//!
//! Turns the HYG database CSV export (Hipparcos, Yale, Gliese) into SQLite tables.
//!
//! hygdb provides:
//! - Catalog reading with per-column coercion and spectral class extraction
//! - Brightness ranking and tiered slicing of the catalog
//! - Sky-cell bucketing of star positions on the H3 grid
//! - SQLite table generation for brightest-N, H3 tiers and the full star info
//! - SQL dump/restore and schema inspection for any SQLite database

pub mod star;
pub mod sky;
pub mod catalog;
pub mod ranking;
pub mod pipeline;
pub mod storage;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use star::{CellStar, Star, extract_spectral_class};
pub use sky::{SkyPosition, cartesian_to_lat_lon};
pub use catalog::Catalog;
pub use storage::StarStore;

use std::path::PathBuf;

/// Result type alias for hygdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for hygdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("CSV file '{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("Database file '{}' does not exist", .0.display())]
    MissingDatabase(PathBuf),

    #[error("SQL dump file '{}' does not exist", .0.display())]
    MissingDump(PathBuf),

    #[error("CSV file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid value for '{column}': {value:?}")]
    InvalidField { column: String, value: String },

    #[error("Sky cell error: {0}")]
    SkyCell(String),

    #[error("No valid star data found in CSV file")]
    NoStars,

    #[error("No stars could be processed with H3 hashing")]
    NoCells,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
