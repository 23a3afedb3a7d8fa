//! hygdb CLI - HYG star catalog to SQLite

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "hygdb")]
#[command(version)]
#[command(about = "Convert the HYG star catalog CSV into SQLite tables")]
#[command(long_about = r#"
hygdb turns the HYG database CSV export into SQLite tables:
  • brightest N stars, bucketed on the H3 grid
  • tiered H3 tables (resolutions 0, 1 and 2) over the magnitude ranking
  • the full star info table
and ships two SQLite utilities: SQL dump/restore and a schema inspector.

Example usage:
  hygdb brightest hygdata_v41.csv 300
  hygdb cells hygdata_v41.csv --skip 10 --include-rest
  hygdb dump export stars_h3.sqlite3 stars_h3.sql
  hygdb schema stars_h3.sqlite3
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./hygdb.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the brightest N stars with their H3 level 0 cell
    Brightest {
        /// Path to the HYG database CSV file
        csv_file: PathBuf,

        /// Number of brightest stars to extract [default: 300]
        brightest_n: Option<usize>,

        /// Path to output SQLite file [default: stars_brightest.sqlite3]
        #[arg(long)]
        sqlite_file: Option<PathBuf>,
    },

    /// Store consecutive slices of the magnitude ranking at H3 levels 0, 1 and 2
    #[command(alias = "h3")]
    Cells {
        /// Path to the HYG database CSV file
        csv_file: PathBuf,

        /// Path to output SQLite file [default: stars_h3.sqlite3]
        #[arg(long)]
        sqlite_file: Option<PathBuf>,

        /// Number of brightest stars to skip [default: 0]
        #[arg(long)]
        skip: Option<usize>,

        /// Number of stars to process for H3 level 0 [default: 100]
        #[arg(long = "lvl-0-count")]
        lvl_0_count: Option<usize>,

        /// Number of stars to process for H3 level 1 [default: 100]
        #[arg(long = "lvl-1-count")]
        lvl_1_count: Option<usize>,

        /// Process all remaining stars with H3 level 2
        #[arg(long)]
        include_rest: bool,
    },

    /// Store every non-positional catalog column in a stars_info table
    Info {
        /// Path to the HYG database CSV file
        csv_file: PathBuf,

        /// Path to output SQLite file [default: stars_info.sqlite3]
        #[arg(long)]
        sqlite_file: Option<PathBuf>,
    },

    /// Export a SQLite database to a SQL dump, or rebuild one from a dump
    Dump {
        #[command(subcommand)]
        action: DumpAction,
    },

    /// Print tables, indexes, views and triggers of a SQLite database
    Schema {
        /// Path to the SQLite database
        database: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = SchemaFormat::Text)]
        format: SchemaFormat,
    },

    /// Write a default hygdb.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum DumpAction {
    /// Export SQLite database to SQL dump file
    Export {
        /// Path to the SQLite database file
        database_path: PathBuf,

        /// Path where the SQL dump file will be saved
        output_sql_path: PathBuf,
    },

    /// Import SQL dump file to create SQLite database
    Import {
        /// Path to the SQL dump file
        sql_dump_path: PathBuf,

        /// Path for the new SQLite database file
        new_database_path: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        hygdb::ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = hygdb::config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Brightest { csv_file, brightest_n, sqlite_file } => {
            let count = brightest_n.unwrap_or(config.brightest.count);
            let sqlite_file = sqlite_file.unwrap_or(config.brightest.sqlite_file);
            commands::run_brightest(&csv_file, count, &sqlite_file)
        }

        Commands::Cells { csv_file, sqlite_file, skip, lvl_0_count, lvl_1_count, include_rest } => {
            let counts = hygdb::ranking::TierCounts {
                skip: skip.unwrap_or(config.cells.skip),
                lvl_0_count: lvl_0_count.unwrap_or(config.cells.lvl_0_count),
                lvl_1_count: lvl_1_count.unwrap_or(config.cells.lvl_1_count),
                include_rest: include_rest || config.cells.include_rest,
            };
            let sqlite_file = sqlite_file.unwrap_or(config.cells.sqlite_file);
            commands::run_cells(&csv_file, &counts, &sqlite_file)
        }

        Commands::Info { csv_file, sqlite_file } => {
            let sqlite_file = sqlite_file.unwrap_or(config.info.sqlite_file);
            commands::run_info(&csv_file, &sqlite_file)
        }

        Commands::Dump { action } => match action {
            DumpAction::Export { database_path, output_sql_path } => {
                commands::run_export(&database_path, &output_sql_path)
            }
            DumpAction::Import { sql_dump_path, new_database_path } => {
                commands::run_import(&sql_dump_path, &new_database_path)
            }
        },

        Commands::Schema { database, format } => commands::run_schema(&database, format),

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(hygdb::config::default_config_path);
            hygdb::config::write_config(&path, &hygdb::config::HygConfig::default(), force)?;
            hygdb::ui::success(&format!("Wrote default config to {}", path.display()));
            Ok(())
        }
    }
}
