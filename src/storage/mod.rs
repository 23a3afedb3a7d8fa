//! Storage Layer - SQLite output and utilities
//!
//! Tables written by the catalog pipelines:
//! - stars_brightest_<N>(id, mag, x, y, z, spect_class, h3_0)
//! - stars_h3_<r>(id, mag, x, y, z, spect_class, h3_<r>) for r in 0..=2
//! - stars_info(id, hip, hd, ..., one column per kept catalog column)
//!
//! Plus database-agnostic dump/restore and schema inspection.

pub mod dump;
pub mod inspect;
pub mod schema;
pub mod sqlite;

pub use dump::{ImportOutcome, export_dump, import_dump};
pub use inspect::SchemaReport;
pub use schema::{CellTable, IndexLayout};
pub use sqlite::{CellTableBatch, StarStore};
