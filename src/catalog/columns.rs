//! Column typing for the HYG catalog
//!
//! Column types come from fixed allow-lists: a handful of integer and real
//! columns, `id` as the key, everything else text.

use crate::{Error, Result};
use rusqlite::types::Value;

/// Columns the positional pipelines cannot work without
pub const POSITIONAL_COLUMNS: &[&str] = &["id", "mag", "x", "y", "z", "spect"];

/// Columns the star info pipeline cannot work without
pub const INFO_COLUMNS: &[&str] = &["id"];

pub const INTEGER_COLUMNS: &[&str] = &["hip", "hd", "hr", "comp", "comp_primary", "flam"];

pub const REAL_COLUMNS: &[&str] = &["mag", "absmag", "ci", "lum", "var_min", "var_max"];

/// Positional and kinematic columns left out of the star info table
pub const EXCLUDED_INFO_COLUMNS: &[&str] = &[
    "ra", "dec", "dist", "pmra", "pmdec", "rv",
    "vx", "vy", "vz", "rarad", "decrad", "pmrarad", "pmdecrad",
    "x", "y", "z",
];

/// SQLite storage class of a catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// `id INTEGER PRIMARY KEY`
    Key,
    Integer,
    Real,
    Text,
}

impl ColumnKind {
    pub fn classify(name: &str) -> Self {
        if name == "id" {
            ColumnKind::Key
        } else if INTEGER_COLUMNS.contains(&name) {
            ColumnKind::Integer
        } else if REAL_COLUMNS.contains(&name) {
            ColumnKind::Real
        } else {
            ColumnKind::Text
        }
    }

    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Key => "INTEGER PRIMARY KEY",
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Text => "TEXT",
        }
    }

    /// Coerce a raw CSV cell. Blank cells become NULL, except that a key
    /// holding only whitespace is invalid rather than missing.
    pub fn coerce(&self, column: &str, raw: &str) -> Result<Value> {
        let blank = match self {
            ColumnKind::Key => raw.is_empty(),
            _ => raw.trim().is_empty(),
        };
        if blank {
            return Ok(Value::Null);
        }

        match self {
            ColumnKind::Key | ColumnKind::Integer => parse_int(column, raw).map(Value::Integer),
            ColumnKind::Real => parse_float(column, raw).map(Value::Real),
            ColumnKind::Text => Ok(Value::Text(raw.to_string())),
        }
    }
}

/// A column carried into the star info table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    pub name: String,
    pub kind: ColumnKind,
}

impl CatalogColumn {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = ColumnKind::classify(&name);
        Self { name, kind }
    }
}

/// Header columns minus the excluded ones, in header order.
pub fn included_columns(headers: &[String]) -> Vec<CatalogColumn> {
    headers
        .iter()
        .filter(|h| !EXCLUDED_INFO_COLUMNS.contains(&h.as_str()))
        .map(CatalogColumn::new)
        .collect()
}

pub(crate) fn parse_int(column: &str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| invalid(column, raw))
}

pub(crate) fn parse_float(column: &str, raw: &str) -> Result<f64> {
    raw.trim().parse().map_err(|_| invalid(column, raw))
}

fn invalid(column: &str, raw: &str) -> Error {
    Error::InvalidField {
        column: column.to_string(),
        value: raw.to_string(),
    }
}
