//! End-to-end pipeline tests against a small HYG-shaped catalog
//!
//! The fixture holds 11 data rows:
//! - ids 0..=7 have full positions (id 7 sits at the origin, id 6 has no magnitude)
//! - id 8 lacks x, the `abc` row has an unparseable id, the last row has no id

use hygdb::catalog::{Catalog, INFO_COLUMNS, POSITIONAL_COLUMNS};
use hygdb::pipeline;
use hygdb::ranking::TierCounts;
use hygdb::storage::{self, SchemaReport, StarStore};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hyg_sample.csv")
}

fn index_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'index' ORDER BY name")
        .unwrap();
    stmt.query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap()
}

#[test]
fn test_positioned_stars() {
    let catalog = Catalog::open(&fixture(), POSITIONAL_COLUMNS).unwrap();
    let stars = catalog.read_stars().unwrap();

    let ids: Vec<_> = stars.iter().map(|s| s.id).collect();
    assert_eq!(ids, (0..=7).map(Some).collect::<Vec<_>>());

    let dwarf = stars.iter().find(|s| s.id == Some(6)).unwrap();
    assert_eq!(dwarf.mag, f64::INFINITY);
    assert_eq!(dwarf.spect_class, Some('A'));
}

#[test]
fn test_brightest_table() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("brightest.sqlite3");

    let catalog = Catalog::open(&fixture(), POSITIONAL_COLUMNS).unwrap();
    let batch = pipeline::brightest(&catalog, 3).unwrap();
    let mut store = StarStore::open(&db).unwrap();
    store.write_cell_tables(std::slice::from_ref(&batch)).unwrap();

    assert_eq!(store.count_rows("stars_brightest_3").unwrap(), 3);
    assert_eq!(
        store.table_columns("stars_brightest_3").unwrap(),
        vec!["id", "mag", "x", "y", "z", "spect_class", "h3_0"]
    );

    let conn = store.connection();
    let ids: Vec<i64> = conn
        .prepare("SELECT id FROM stars_brightest_3 ORDER BY mag")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(ids, vec![0, 3, 4]);

    assert_eq!(
        index_names(conn),
        vec!["idx_stars_brightest_3_h3_0", "idx_stars_brightest_3_mag"]
    );
}

#[test]
fn test_brightest_default_takes_everything_locatable() {
    let catalog = Catalog::open(&fixture(), POSITIONAL_COLUMNS).unwrap();
    let batch = pipeline::brightest(&catalog, 300).unwrap();
    // 8 positioned stars, the origin has no direction
    assert_eq!(batch.stars.len(), 7);
    assert_eq!(batch.stars.last().unwrap().star.id, Some(6));
}

#[test]
fn test_tier_tables() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("h3.sqlite3");

    let catalog = Catalog::open(&fixture(), POSITIONAL_COLUMNS).unwrap();
    let counts = TierCounts {
        skip: 1,
        lvl_0_count: 2,
        lvl_1_count: 2,
        include_rest: true,
    };
    let run = pipeline::tiers(&catalog, &counts).unwrap();
    assert_eq!(run.total, 8);

    let mut store = StarStore::open(&db).unwrap();
    let written = store.write_cell_tables(&run.batches).unwrap();
    // ranking: 0, 7, 3, 4, 1, 2, 5, 6; star 7 is at the origin
    assert_eq!(written, vec![1, 2, 3]);

    let conn = store.connection();
    let level_two: Vec<(i64, String)> = conn
        .prepare("SELECT id, spect_class FROM stars_h3_2 ORDER BY mag ASC")
        .unwrap()
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(
        level_two,
        vec![(2, "K".to_string()), (5, "M".to_string()), (6, "A".to_string())]
    );

    let indexes = index_names(conn);
    assert!(indexes.contains(&"idx_stars_h3_0_h3_0".to_string()));
    assert!(indexes.contains(&"idx_stars_h3_2_mag".to_string()));
    assert_eq!(indexes.len(), 6);
}

#[test]
fn test_info_table() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("info.sqlite3");

    let catalog = Catalog::open(&fixture(), INFO_COLUMNS).unwrap();
    let run = pipeline::info(&catalog).unwrap();
    assert_eq!(run.columns.len(), 21);
    assert_eq!(run.rows.len(), 9);

    let mut store = StarStore::open(&db).unwrap();
    store.write_info_table(&run.columns, &run.rows).unwrap();

    let columns = store.table_columns("stars_info").unwrap();
    assert!(columns.contains(&"proper".to_string()));
    assert!(!columns.contains(&"x".to_string()));
    assert!(!columns.contains(&"rarad".to_string()));

    let (proper, lum): (String, f64) = store
        .connection()
        .query_row("SELECT proper, lum FROM stars_info WHERE id = 0", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(proper, "Sol");
    assert_eq!(lum, 1.0);

    let flam: i64 = store
        .connection()
        .query_row("SELECT flam FROM stars_info WHERE id = 8", [], |r| r.get(0))
        .unwrap();
    assert_eq!(flam, 17);
}

#[test]
fn test_dump_roundtrip_and_schema() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("h3.sqlite3");
    let sql = dir.path().join("h3.sql");
    let copy = dir.path().join("copy.sqlite3");

    let catalog = Catalog::open(&fixture(), POSITIONAL_COLUMNS).unwrap();
    let counts = TierCounts {
        skip: 0,
        lvl_0_count: 3,
        lvl_1_count: 3,
        include_rest: true,
    };
    let run = pipeline::tiers(&catalog, &counts).unwrap();
    StarStore::open(&db).unwrap().write_cell_tables(&run.batches).unwrap();

    storage::export_dump(&db, &sql).unwrap();
    storage::import_dump(&sql, &copy).unwrap();

    let original = SchemaReport::inspect(&db).unwrap();
    let restored = SchemaReport::inspect(&copy).unwrap();
    let names = |r: &SchemaReport| r.tables.iter().map(|t| t.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(&original), vec!["stars_h3_0", "stars_h3_1", "stars_h3_2"]);
    assert_eq!(names(&original), names(&restored));
    assert_eq!(original.indexes.len(), restored.indexes.len());

    let store = StarStore::open(&copy).unwrap();
    for batch in &run.batches {
        assert_eq!(store.count_rows(&batch.table.name).unwrap(), batch.stars.len());
    }
}
