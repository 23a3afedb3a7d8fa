//! SQL dump export and import
//!
//! The dump mirrors SQLite's `.dump` layout: table definitions each followed
//! by their rows, then indexes, triggers and views, all inside one
//! transaction. Values are rendered by SQLite's own `quote()`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use rusqlite::Connection;
use crate::{Error, Result};
use super::schema::quote_ident;

/// What an import did to the target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// An existing database was removed first
    pub replaced: bool,
}

/// Dump the database at `database` into the SQL file `output`.
pub fn export_dump(database: &Path, output: &Path) -> Result<usize> {
    if !database.exists() {
        return Err(Error::MissingDatabase(database.to_path_buf()));
    }

    let conn = Connection::open(database)?;
    let mut out = BufWriter::new(File::create(output)?);
    let lines = write_dump(&conn, &mut out)?;
    out.flush()?;

    tracing::info!("Exported {} statements from {}", lines, database.display());
    Ok(lines)
}

/// Write the dump statements to `out`, returning how many were written.
pub fn write_dump<W: Write>(conn: &Connection, out: &mut W) -> Result<usize> {
    let mut lines = 0;
    let mut emit = |out: &mut W, stmt: &str| -> Result<()> {
        writeln!(out, "{}", stmt)?;
        lines += 1;
        Ok(())
    };

    emit(out, "BEGIN TRANSACTION;")?;

    let tables = schema_entries(
        conn,
        "SELECT name, sql FROM sqlite_master WHERE sql NOT NULL AND type == 'table' ORDER BY name",
    )?;

    let mut sequence = Vec::new();
    let mut writable_schema = false;
    for (name, sql) in tables {
        if name == "sqlite_sequence" {
            sequence.push("DELETE FROM \"sqlite_sequence\";".to_string());
            sequence.extend(insert_statements(conn, &name)?);
            continue;
        } else if name == "sqlite_stat1" {
            emit(out, "ANALYZE \"sqlite_master\";")?;
        } else if name.starts_with("sqlite_") {
            continue;
        } else if sql.starts_with("CREATE VIRTUAL TABLE") {
            // Rows live in the shadow tables, which are dumped as ordinary tables
            if !writable_schema {
                emit(out, "PRAGMA writable_schema=ON;")?;
                writable_schema = true;
            }
            emit(out, &virtual_table_entry(&name, &sql))?;
            continue;
        } else {
            emit(out, &format!("{};", sql))?;
        }

        for insert in insert_statements(conn, &name)? {
            emit(out, &insert)?;
        }
    }

    let objects = schema_entries(
        conn,
        "SELECT name, sql FROM sqlite_master WHERE sql NOT NULL AND type IN ('index', 'trigger', 'view')",
    )?;
    for (_, sql) in objects {
        emit(out, &format!("{};", sql))?;
    }

    for stmt in &sequence {
        emit(out, stmt)?;
    }

    if writable_schema {
        emit(out, "PRAGMA writable_schema=OFF;")?;
    }

    emit(out, "COMMIT;")?;
    Ok(lines)
}

/// Rebuild a database at `database` from the dump file `dump`.
pub fn import_dump(dump: &Path, database: &Path) -> Result<ImportOutcome> {
    if !dump.exists() {
        return Err(Error::MissingDump(dump.to_path_buf()));
    }

    let replaced = database.exists();
    if replaced {
        tracing::warn!("'{}' already exists and will be overwritten", database.display());
        fs::remove_file(database)?;
    } else if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let script = fs::read_to_string(dump)?;
    let conn = Connection::open(database)?;
    restore_dump(&conn, &script)?;

    tracing::info!("Imported {} into {}", dump.display(), database.display());
    Ok(ImportOutcome { replaced })
}

/// Execute a dump script against an open connection
pub fn restore_dump(conn: &Connection, script: &str) -> Result<()> {
    conn.execute_batch(script)?;
    Ok(())
}

/// Register a virtual table straight in `sqlite_master`, as `.dump` does
fn virtual_table_entry(name: &str, sql: &str) -> String {
    format!(
        "INSERT INTO sqlite_master(type,name,tbl_name,rootpage,sql) VALUES('table',{0},{0},0,{1});",
        quote_literal(name),
        quote_literal(sql)
    )
}

fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn schema_entries(conn: &Connection, sql: &str) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare(sql)?;
    let entries = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

fn insert_statements(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let table_ident = quote_ident(table);

    let mut info = conn.prepare(&format!("PRAGMA table_info({})", table_ident))?;
    let columns = info
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let quoted: Vec<String> = columns
        .iter()
        .map(|c| format!("quote({})", quote_ident(c)))
        .collect();
    let sql = format!("SELECT {} FROM {}", quoted.join(", "), table_ident);

    let mut stmt = conn.prepare(&sql)?;
    let width = columns.len();
    let rows = stmt
        .query_map([], |row| {
            let values = (0..width)
                .map(|i| row.get::<_, String>(i))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(format!("INSERT INTO {} VALUES({});", table_ident, values.join(",")))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
