//! Table definitions and SQL generation

use crate::catalog::CatalogColumn;
use crate::sky::cell_column;
use h3o::Resolution;

/// Table holding the full star info
pub const INFO_TABLE: &str = "stars_info";

/// Columns shared by every cell table, before the `h3_<r>` column
pub const CELL_TABLE_COLUMNS: &[(&str, &str)] = &[
    ("id", "INTEGER"),
    ("mag", "REAL"),
    ("x", "REAL"),
    ("y", "REAL"),
    ("z", "REAL"),
    ("spect_class", "TEXT"),
];

/// Double-quote an identifier coming from outside (CSV headers, user tables)
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", table)
}

/// Which index set a cell table gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLayout {
    /// Magnitude index first, then the cell index
    Brightest,
    /// Cell index first, then an ascending magnitude index
    Tier,
}

/// A table of stars bucketed at one H3 resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTable {
    pub name: String,
    pub resolution: Resolution,
    pub layout: IndexLayout,
}

impl CellTable {
    /// `stars_brightest_<n>`, bucketed at resolution 0
    pub fn brightest(n: usize) -> Self {
        Self {
            name: format!("stars_brightest_{}", n),
            resolution: Resolution::Zero,
            layout: IndexLayout::Brightest,
        }
    }

    /// `stars_h3_<r>`
    pub fn tier(resolution: Resolution) -> Self {
        Self {
            name: format!("stars_h3_{}", u8::from(resolution)),
            resolution,
            layout: IndexLayout::Tier,
        }
    }

    pub fn cell_column(&self) -> String {
        cell_column(self.resolution)
    }

    pub fn column_names(&self) -> Vec<String> {
        CELL_TABLE_COLUMNS
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(std::iter::once(self.cell_column()))
            .collect()
    }

    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = CELL_TABLE_COLUMNS
            .iter()
            .map(|(name, ty)| format!("{} {}", name, ty))
            .chain(std::iter::once(format!("{} TEXT", self.cell_column())))
            .collect();
        format!("CREATE TABLE {} ({})", self.name, columns.join(", "))
    }

    pub fn insert_sql(&self) -> String {
        let columns = self.column_names();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            columns.join(", "),
            placeholders.join(", ")
        )
    }

    pub fn index_sql(&self) -> Vec<String> {
        let table = &self.name;
        let cell = self.cell_column();
        let by_cell = format!("CREATE INDEX idx_{table}_{cell} ON {table}({cell})");
        match self.layout {
            IndexLayout::Brightest => vec![
                format!("CREATE INDEX idx_{table}_mag ON {table}(mag)"),
                by_cell,
            ],
            IndexLayout::Tier => vec![
                by_cell,
                format!("CREATE INDEX idx_{table}_mag ON {table}(mag ASC)"),
            ],
        }
    }
}

pub fn create_info_table(columns: &[CatalogColumn]) -> String {
    let defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), c.kind.sql_type()))
        .collect();
    format!("CREATE TABLE {} ({})", INFO_TABLE, defs.join(", "))
}

pub fn insert_info_row(columns: &[CatalogColumn]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote_ident(&c.name)).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
        INFO_TABLE,
        names.join(", "),
        placeholders
    )
}
