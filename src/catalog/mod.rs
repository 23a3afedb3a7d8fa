//! Catalog Layer - HYG CSV validation and row coercion
//!
//! Rows that fail to parse are logged and skipped; I/O and CSV framing errors
//! abort the read.

pub mod columns;

pub use columns::{CatalogColumn, ColumnKind, INFO_COLUMNS, POSITIONAL_COLUMNS, included_columns};

use crate::star::Star;
use crate::{Error, Result};
use columns::{parse_float, parse_int};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::types::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One row of the star info table, values aligned with the included columns
pub type InfoRow = Vec<Value>;

/// A validated HYG CSV file.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
    headers: Vec<String>,
}

impl Catalog {
    /// Check the file exists and its header carries every required column
    pub fn open(path: &Path, required: &[&str]) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut missing: Vec<String> = required
            .iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(Error::MissingColumns(missing));
        }

        tracing::debug!("Catalog {} has {} columns", path.display(), headers.len());
        Ok(Self {
            path: path.to_path_buf(),
            headers,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Read every star with a full Cartesian position.
    ///
    /// Rows missing any of x, y, z are dropped without a warning.
    pub fn read_stars(&self) -> Result<Vec<Star>> {
        let index = HeaderIndex::new(&self.headers);
        let mut stars = Vec::new();

        self.for_each_record(|line, record| {
            match index.star(record) {
                Ok(Some(star)) => stars.push(star),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping row {} with invalid data: {}", line, e),
            }
        })?;

        tracing::debug!("Read {} positioned stars", stars.len());
        Ok(stars)
    }

    /// Read the given columns for every row that has an id.
    pub fn read_info_rows(&self, columns: &[CatalogColumn]) -> Result<Vec<InfoRow>> {
        let index = HeaderIndex::new(&self.headers);
        let id_slot = columns.iter().position(|c| c.kind == ColumnKind::Key);
        let mut rows = Vec::new();

        self.for_each_record(|line, record| {
            let row: Result<InfoRow> = columns
                .iter()
                .map(|c| c.kind.coerce(&c.name, index.get(record, &c.name)))
                .collect();

            match row {
                Ok(row) => {
                    if id_slot.is_some_and(|i| row[i] == Value::Null) {
                        tracing::warn!("Skipping row {} - no ID", line);
                    } else {
                        rows.push(row);
                    }
                }
                Err(e) => tracing::warn!("Skipping row {} with invalid data: {}", line, e),
            }
        })?;

        tracing::debug!("Read {} info rows", rows.len());
        Ok(rows)
    }

    fn for_each_record(&self, mut f: impl FnMut(u64, &StringRecord)) -> Result<()> {
        let mut reader = ReaderBuilder::new().flexible(true).from_path(&self.path)?;
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            f(line, &record);
        }
        Ok(())
    }
}

/// Column name -> field position lookup
struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new(headers: &[String]) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self { positions }
    }

    /// Field by column name; short rows and unknown columns read as empty
    fn get<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }

    fn optional_float(&self, record: &StringRecord, column: &str) -> Result<Option<f64>> {
        match self.get(record, column) {
            "" => Ok(None),
            raw => parse_float(column, raw).map(Some),
        }
    }

    fn star(&self, record: &StringRecord) -> Result<Option<Star>> {
        let id = match self.get(record, "id") {
            "" => None,
            raw => Some(parse_int("id", raw)?),
        };
        let mag = self.optional_float(record, "mag")?.unwrap_or(f64::INFINITY);
        let x = self.optional_float(record, "x")?;
        let y = self.optional_float(record, "y")?;
        let z = self.optional_float(record, "z")?;

        let (Some(x), Some(y), Some(z)) = (x, y, z) else {
            return Ok(None);
        };

        Ok(Some(Star::new(id, mag, x, y, z).with_spect(self.get(record, "spect"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::open(Path::new("/nonexistent/hyg.csv"), POSITIONAL_COLUMNS).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }

    #[test]
    fn test_missing_columns_are_reported_sorted() {
        let file = write_csv("id,mag,spect\n1,2.0,G2V\n");
        let err = Catalog::open(file.path(), POSITIONAL_COLUMNS).unwrap_err();
        match err {
            Error::MissingColumns(cols) => assert_eq!(cols, vec!["x", "y", "z"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_stars_coercion() {
        let file = write_csv(
            "id,mag,x,y,z,spect\n\
             1,1.5,1,0,0,G2V\n\
             2,,0,1,0,sdM1\n\
             ,3.0,0,0,1,\n\
             4,2.0,,1,1,K0\n\
             oops,2.0,1,1,1,K0\n\
             6,bright,1,1,1,K0\n",
        );
        let catalog = Catalog::open(file.path(), POSITIONAL_COLUMNS).unwrap();
        let stars = catalog.read_stars().unwrap();

        assert_eq!(stars.len(), 3);
        assert_eq!(stars[0].id, Some(1));
        assert_eq!(stars[0].spect_class, Some('G'));
        assert_eq!(stars[1].mag, f64::INFINITY);
        assert_eq!(stars[1].spect_class, Some('M'));
        assert_eq!(stars[2].id, None);
        assert_eq!(stars[2].spect_class, None);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let file = write_csv("id,mag,x,y,z,spect\n1,1.0,1,2,3\n2,1.0,1,2\n");
        let catalog = Catalog::open(file.path(), POSITIONAL_COLUMNS).unwrap();
        let stars = catalog.read_stars().unwrap();
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].spect_class, None);
    }

    #[test]
    fn test_read_info_rows() {
        let file = write_csv(
            "id,hip,proper,ra,mag\n\
             0,,Sol,0.0,-26.7\n\
             1,1,,0.1,9.1\n\
             ,2,Nameless,0.2,5.0\n\
             3,x3,Bad,0.3,5.0\n\
             \x20 ,4,Blank,0.4,5.0\n",
        );
        let catalog = Catalog::open(file.path(), INFO_COLUMNS).unwrap();
        let columns = included_columns(catalog.headers());
        assert_eq!(columns.len(), 4);

        let rows = catalog.read_info_rows(&columns).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                Value::Integer(0),
                Value::Null,
                Value::Text("Sol".into()),
                Value::Real(-26.7),
            ]
        );
        assert_eq!(rows[1][2], Value::Null);
    }
}
