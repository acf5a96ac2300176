//! Product Inventory - interactive stock database
//!
//! Imports the startup CSV into SQLite, then hands control to the menu.

use clap::Parser;
use product_inventory::{import_backup, import_csv, store, Shell};
use std::path::PathBuf;

/// Single-user product inventory backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "product_inventory")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, env = "INVENTORY_DATABASE", default_value = "inventory.db")]
    database: PathBuf,

    /// CSV file imported on startup (name, price, quantity, MM/DD/YYYY date)
    #[arg(short, long, env = "INVENTORY_CSV", default_value = "inventory.csv")]
    inventory: PathBuf,

    /// Where the backup menu option writes its CSV
    #[arg(short, long, env = "INVENTORY_BACKUP", default_value = "backup.csv")]
    backup: PathBuf,

    /// Do not import the startup CSV
    #[arg(long, env = "INVENTORY_SKIP_IMPORT", default_value_t = false)]
    skip_import: bool,

    /// Restore records from a previously written backup before starting
    #[arg(long, env = "INVENTORY_RESTORE")]
    restore: Option<PathBuf>,
}

fn main() {
    // Keep the default quiet so log lines don't interleave with prompts.
    // Set RUST_LOG=info (or debug) for more detail.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    log::info!("Starting product_inventory...");

    let mut conn = match store::open(&args.database) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("Failed to open database {}: {}", args.database.display(), e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.restore {
        if let Err(e) = import_backup(&mut conn, path) {
            log::error!("Restore from {} aborted: {}", path.display(), e);
            eprintln!("Restore from {} aborted, nothing was changed: {e}", path.display());
        }
    }

    if args.skip_import {
        log::info!("Skipping startup import");
    } else if !args.inventory.exists() {
        log::warn!(
            "Startup CSV {} not found, skipping import",
            args.inventory.display()
        );
    } else if let Err(e) = import_csv(&mut conn, &args.inventory) {
        log::error!("Import of {} aborted: {}", args.inventory.display(), e);
        eprintln!(
            "Import of {} aborted, nothing was changed: {e}",
            args.inventory.display()
        );
    }

    let stdin = std::io::stdin();
    let mut shell = Shell::new(conn, stdin.lock(), std::io::stdout(), args.backup);
    if let Err(e) = shell.run() {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
