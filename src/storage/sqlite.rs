//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, params_from_iter};
use crate::Result;
use crate::catalog::{CatalogColumn, InfoRow};
use crate::star::CellStar;
use super::schema::{self, CellTable, INFO_TABLE, quote_ident};

/// One cell table and the stars that go into it
#[derive(Debug, Clone)]
pub struct CellTableBatch {
    pub table: CellTable,
    pub stars: Vec<CellStar>,
}

/// SQLite-backed output for the catalog pipelines
pub struct StarStore {
    conn: Connection,
}

impl StarStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========== Cell Tables ==========

    /// Recreate every table in `batches` and fill it, committing once.
    ///
    /// Returns the number of rows written per table.
    pub fn write_cell_tables(&mut self, batches: &[CellTableBatch]) -> Result<Vec<usize>> {
        let tx = self.conn.transaction()?;
        let mut written = Vec::with_capacity(batches.len());
        for batch in batches {
            written.push(write_cell_table(&tx, &batch.table, &batch.stars)?);
        }
        tx.commit()?;
        Ok(written)
    }

    // ========== Star Info ==========

    /// Recreate `stars_info` with one column per catalog column.
    pub fn write_info_table(&mut self, columns: &[CatalogColumn], rows: &[InfoRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(&schema::drop_table(INFO_TABLE), [])?;

        let create = schema::create_info_table(columns);
        tracing::debug!("{}", create);
        tx.execute(&create, [])?;

        {
            let mut stmt = tx.prepare(&schema::insert_info_row(columns))?;
            for row in rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }

        tx.commit()?;
        Ok(rows.len())
    }

    // ========== Inspection ==========

    /// Count rows in a table
    pub fn count_rows(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Column names of a table, in declaration order
    pub fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }
}

fn write_cell_table(conn: &Connection, table: &CellTable, stars: &[CellStar]) -> Result<usize> {
    conn.execute(&schema::drop_table(&table.name), [])?;
    let create = table.create_sql();
    tracing::debug!("{}", create);
    conn.execute(&create, [])?;

    {
        let mut stmt = conn.prepare(&table.insert_sql())?;
        for cs in stars {
            stmt.execute(params![
                cs.star.id,
                cs.star.mag,
                cs.star.x,
                cs.star.y,
                cs.star.z,
                cs.spect_class_text(),
                cs.cell_text(),
            ])?;
        }
    }

    for index in table.index_sql() {
        conn.execute(&index, [])?;
    }

    tracing::debug!("Wrote {} rows to {}", stars.len(), table.name);
    Ok(stars.len())
}
