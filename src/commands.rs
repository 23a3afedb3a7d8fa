use crate::SchemaFormat;
use hygdb::catalog::{Catalog, INFO_COLUMNS, POSITIONAL_COLUMNS};
use hygdb::config::ensure_db_dir;
use hygdb::pipeline::{self, magnitude_span};
use hygdb::ranking::TierCounts;
use hygdb::storage::{self, SchemaReport, StarStore};
use hygdb::ui::{self, Spinner, TableSummary};
use std::path::Path;

pub fn run_brightest(csv_file: &Path, count: usize, sqlite_file: &Path) -> anyhow::Result<()> {
    ui::banner("Brightest stars");
    ui::detail("Catalog", &csv_file.display().to_string());
    ui::detail("Extracting", &format!("{} brightest stars", count));
    ui::detail("Output", &sqlite_file.display().to_string());

    let catalog = Catalog::open(csv_file, POSITIONAL_COLUMNS)?;

    let spinner = Spinner::new("Reading and sorting stars by magnitude...");
    let batch = pipeline::brightest(&catalog, count);
    spinner.finish();
    let batch = batch?;

    ui::step(&format!("Found {} brightest stars", batch.stars.len()));
    if let Some((first, last)) = magnitude_span(&batch.stars) {
        ui::magnitude_range("Selection", first, last);
    }

    ui::step("Creating SQLite database...");
    ensure_db_dir(sqlite_file)?;
    let mut store = StarStore::open(sqlite_file)?;
    let written = store.write_cell_tables(std::slice::from_ref(&batch))?;

    let summary = vec![TableSummary::new(
        batch.table.name.clone(),
        written[0],
        magnitude_span(&batch.stars),
    )];
    finish(&summary, sqlite_file);
    Ok(())
}

pub fn run_cells(csv_file: &Path, counts: &TierCounts, sqlite_file: &Path) -> anyhow::Result<()> {
    ui::banner("H3 sky-cell tiers");
    ui::detail("Catalog", &csv_file.display().to_string());
    ui::detail("Skipping", &format!("first {} brightest stars", counts.skip));
    ui::detail("H3 level 0", &format!("{} stars", counts.lvl_0_count));
    ui::detail("H3 level 1", &format!("{} stars", counts.lvl_1_count));
    if counts.include_rest {
        ui::detail("H3 level 2", "all remaining stars");
    }
    ui::detail("Output", &sqlite_file.display().to_string());

    let catalog = Catalog::open(csv_file, POSITIONAL_COLUMNS)?;

    let spinner = Spinner::new("Reading and sorting stars by magnitude...");
    let run = pipeline::tiers(&catalog, counts);
    spinner.finish();
    let run = run?;

    ui::step(&format!("Found {} valid stars", run.total));
    if run.total < counts.requested() {
        ui::warn(&format!(
            "Only {} stars available, but {} requested; processing as many as available",
            run.total,
            counts.requested()
        ));
    }

    for batch in &run.batches {
        ui::step(&format!(
            "Processed {} stars for H3 level {}",
            batch.stars.len(),
            u8::from(batch.table.resolution)
        ));
        if let Some((first, last)) = magnitude_span(&batch.stars) {
            ui::magnitude_range(&format!("H3 level {}", u8::from(batch.table.resolution)), first, last);
        }
    }

    ui::step("Creating SQLite database...");
    ensure_db_dir(sqlite_file)?;
    let mut store = StarStore::open(sqlite_file)?;
    let written = store.write_cell_tables(&run.batches)?;

    let summary: Vec<TableSummary> = run
        .batches
        .iter()
        .zip(written)
        .map(|(batch, rows)| {
            TableSummary::new(batch.table.name.clone(), rows, magnitude_span(&batch.stars))
        })
        .collect();
    finish(&summary, sqlite_file);
    Ok(())
}

pub fn run_info(csv_file: &Path, sqlite_file: &Path) -> anyhow::Result<()> {
    ui::banner("Star information");
    ui::detail("Catalog", &csv_file.display().to_string());
    ui::detail("Output", &sqlite_file.display().to_string());

    let catalog = Catalog::open(csv_file, INFO_COLUMNS)?;

    let spinner = Spinner::new("Reading star information...");
    let run = pipeline::info(&catalog);
    spinner.finish();
    let run = run?;

    let names: Vec<&str> = run.columns.iter().map(|c| c.name.as_str()).collect();
    tracing::debug!("Including columns: {:?}", names);
    ui::detail("Columns", &names.join(", "));
    ui::step(&format!("Found {} stars with valid data", run.rows.len()));

    ui::step("Creating SQLite database...");
    ensure_db_dir(sqlite_file)?;
    let mut store = StarStore::open(sqlite_file)?;
    let written = store.write_info_table(&run.columns, &run.rows)?;

    let summary = vec![TableSummary::new(storage::schema::INFO_TABLE, written, None)];
    finish(&summary, sqlite_file);
    Ok(())
}

pub fn run_export(database: &Path, output: &Path) -> anyhow::Result<()> {
    let statements = storage::export_dump(database, output)?;
    ui::success(&format!(
        "Exported '{}' to '{}' ({} statements)",
        database.display(),
        output.display(),
        statements
    ));
    Ok(())
}

pub fn run_import(dump: &Path, database: &Path) -> anyhow::Result<()> {
    let outcome = storage::import_dump(dump, database)?;
    if outcome.replaced {
        ui::warn(&format!("Replaced existing database '{}'", database.display()));
    }
    ui::success(&format!(
        "Imported '{}' to create '{}'",
        dump.display(),
        database.display()
    ));
    Ok(())
}

pub fn run_schema(database: &Path, format: SchemaFormat) -> anyhow::Result<()> {
    let report = SchemaReport::inspect(database)?;
    match format {
        SchemaFormat::Text => print!("{}", report.render_text()),
        SchemaFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn finish(summary: &[TableSummary], sqlite_file: &Path) {
    if !ui::is_quiet() {
        println!("{}", ui::summary_table(summary));
    }
    ui::success(&format!("SQLite database saved to: {}", sqlite_file.display()));
}
