//! Schema inspection for arbitrary SQLite databases

use std::fmt::Write as _;
use std::path::Path;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};
use crate::{Error, Result};
use super::schema::quote_ident;

const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseInfo {
    pub path: String,
    pub size_bytes: u64,
    pub sqlite_version: String,
    pub page_count: i64,
    pub page_size: i64,
}

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ColumnInfo {
    #[tabled(rename = "#")]
    pub cid: i64,
    #[tabled(rename = "Column")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub decl_type: String,
    #[tabled(rename = "Not Null")]
    pub not_null: bool,
    #[tabled(rename = "Default", display_with = "display_default")]
    pub default: Option<String>,
    #[tabled(rename = "PK")]
    pub pk: i64,
}

fn display_default(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub sql: String,
    pub columns: Vec<ColumnInfo>,
}

/// An index, view or trigger
#[derive(Debug, Clone, Serialize)]
pub struct SchemaObject {
    pub name: String,
    /// Owning table (empty for views)
    pub table: String,
    pub sql: String,
}

/// Everything the inspector reports about one database
#[derive(Debug, Clone, Serialize)]
pub struct SchemaReport {
    pub database: DatabaseInfo,
    pub tables: Vec<TableSchema>,
    pub indexes: Vec<SchemaObject>,
    pub views: Vec<SchemaObject>,
    pub triggers: Vec<SchemaObject>,
}

impl SchemaReport {
    /// Open `path` and collect its schema
    pub fn inspect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingDatabase(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        Self::collect(&conn, path)
    }

    pub fn collect(conn: &Connection, path: &Path) -> Result<Self> {
        let size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let database = DatabaseInfo {
            path: path.display().to_string(),
            size_bytes,
            sqlite_version: conn.query_row("SELECT sqlite_version()", [], |r| r.get(0))?,
            page_count: conn.query_row("PRAGMA page_count", [], |r| r.get(0))?,
            page_size: conn.query_row("PRAGMA page_size", [], |r| r.get(0))?,
        };

        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
        let table_names = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tables = Vec::new();
        for name in table_names {
            let sql: Option<String> = conn
                .query_row(
                    "SELECT sql FROM sqlite_master WHERE type='table' AND name=?1",
                    [&name],
                    |r| r.get(0),
                )
                .optional()?
                .flatten();
            let columns = table_info(conn, &name)?;
            tables.push(TableSchema {
                name,
                sql: sql.unwrap_or_default(),
                columns,
            });
        }

        Ok(Self {
            database,
            tables,
            indexes: objects(
                conn,
                "SELECT name, tbl_name, sql FROM sqlite_master WHERE type='index' AND sql IS NOT NULL ORDER BY name",
            )?,
            views: objects(
                conn,
                "SELECT name, '', sql FROM sqlite_master WHERE type='view' ORDER BY name",
            )?,
            triggers: objects(
                conn,
                "SELECT name, tbl_name, sql FROM sqlite_master WHERE type='trigger' ORDER BY name",
            )?,
        })
    }

    /// Human-readable report framed by 80-column separators
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out).ok();
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let db = &self.database;
        write_separator(out, "DATABASE INFORMATION", '=')?;
        writeln!(out, "Database Path: {}", db.path)?;
        writeln!(out, "Database Size: {} bytes", db.size_bytes)?;
        writeln!(out, "SQLite Version: {}", db.sqlite_version)?;
        writeln!(out, "Pages: {} (Page size: {} bytes)", db.page_count, db.page_size)?;

        if self.tables.is_empty() {
            writeln!(out, "\nNo tables found in the database.")?;
        } else {
            write_separator(out, "TABLES", '=')?;
            writeln!(out, "Found {} table(s):", self.tables.len())?;
            for table in &self.tables {
                writeln!(out, "  - {}", table.name)?;
            }
            for table in &self.tables {
                write_separator(out, &format!("TABLE: {}", table.name), '-')?;
                if !table.sql.is_empty() {
                    writeln!(out, "CREATE Statement:")?;
                    writeln!(out, "{}", table.sql)?;
                }
                if !table.columns.is_empty() {
                    writeln!(out, "Columns:")?;
                    writeln!(out, "{}", Table::new(&table.columns).with(Style::rounded()))?;
                }
            }
        }

        write_objects(out, "INDEXES", "index(es)", "indexes", "Index", &self.indexes)?;
        write_objects(out, "VIEWS", "view(s)", "views", "View", &self.views)?;
        write_objects(out, "TRIGGERS", "trigger(s)", "triggers", "Trigger", &self.triggers)?;

        write_separator(out, "SCHEMA INSPECTION COMPLETE", '=')
    }
}

fn table_info(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let columns = stmt
        .query_map([], |r| {
            Ok(ColumnInfo {
                cid: r.get(0)?,
                name: r.get(1)?,
                decl_type: r.get(2)?,
                not_null: r.get::<_, i64>(3)? != 0,
                default: r.get(4)?,
                pk: r.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

fn objects(conn: &Connection, sql: &str) -> Result<Vec<SchemaObject>> {
    let mut stmt = conn.prepare(sql)?;
    let objects = stmt
        .query_map([], |r| {
            Ok(SchemaObject {
                name: r.get(0)?,
                table: r.get(1)?,
                sql: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(objects)
}

fn write_separator(out: &mut String, title: &str, fill: char) -> std::fmt::Result {
    let rule: String = std::iter::repeat_n(fill, SEPARATOR_WIDTH).collect();
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}", center(&format!(" {} ", title), fill))?;
    writeln!(out, "{}", rule)
}

/// Center `text` in the separator width; odd padding goes to the right
fn center(text: &str, fill: char) -> String {
    let len = text.chars().count();
    if len >= SEPARATOR_WIDTH {
        return text.to_string();
    }
    let pad = SEPARATOR_WIDTH - len;
    let left = pad / 2;
    let mut line: String = std::iter::repeat_n(fill, left).collect();
    line.push_str(text);
    line.extend(std::iter::repeat_n(fill, pad - left));
    line
}

fn write_objects(
    out: &mut String,
    heading: &str,
    counted: &str,
    plural: &str,
    label: &str,
    objects: &[SchemaObject],
) -> std::fmt::Result {
    if objects.is_empty() {
        return writeln!(out, "\nNo {} found in the database.", plural);
    }

    write_separator(out, heading, '=')?;
    writeln!(out, "Found {} {}:", objects.len(), counted)?;
    for obj in objects {
        if obj.table.is_empty() {
            writeln!(out, "\n{}: {}", label, obj.name)?;
        } else {
            writeln!(out, "\n{}: {} (Table: {})", label, obj.name, obj.table)?;
        }
        if !obj.sql.is_empty() {
            writeln!(out, "SQL: {}", obj.sql)?;
        }
    }
    Ok(())
}
