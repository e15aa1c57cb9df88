//! # CLI
//!
//! `schoolreg [serve]` runs the server; the other subcommands work on the
//! same storage directly, without going through HTTP.

use std::error::Error;

use clap::{Parser, Subcommand};
use schoolreg_core::{Registry, School, SchoolStore, SqliteStore};
use serde_json::json;

use crate::config::{ServerConfig, StorageConfig};

pub type CliResult<T = ()> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Debug, Parser)]
#[command(name = "schoolreg", version, about = "Register and list schools")]
pub struct Cli {
    #[command(flatten)]
    pub storage: StorageConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve(ServerConfig),

    /// Create the database schema and image directory.
    Init {
        /// Recreate the database even if the file exists.
        #[arg(long)]
        force: bool,
    },

    /// Print all schools, newest first.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Print row count and storage locations.
    Status {
        #[arg(long)]
        json: bool,
    },
}

fn open_registry(storage: &StorageConfig) -> CliResult<Registry<SqliteStore>> {
    let store = SqliteStore::open(&storage.database)?;
    Ok(Registry::new(store, storage.image_store())?)
}

/// Create an empty database and the image directory.
///
/// Fails if the database file exists, unless `force` is set, in which case
/// the file is removed first. Stored images are left alone.
pub fn cmd_init(storage: &StorageConfig, force: bool) -> CliResult {
    if storage.database.exists() {
        if !force {
            return Err(format!(
                "database already exists at {} (use --force to recreate)",
                storage.database.display()
            )
            .into());
        }
        std::fs::remove_file(&storage.database)?;
    }

    let store = SqliteStore::open(&storage.database)?;
    store.initialize()?;
    let images = storage.image_store();
    images.ensure_dir()?;

    println!("Initialized database at {}", storage.database.display());
    println!("Images will be stored in {}", images.dir().display());
    Ok(())
}

pub fn cmd_list(storage: &StorageConfig, json: bool) -> CliResult {
    let registry = open_registry(storage)?;
    let schools = registry.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&schools)?);
    } else {
        print!("{}", format_table(&schools));
    }
    Ok(())
}

pub fn cmd_status(storage: &StorageConfig, json: bool) -> CliResult {
    let registry = open_registry(storage)?;
    let count = registry.count()?;

    if json {
        let status = json!({
            "schools": count,
            "database": storage.database.display().to_string(),
            "image_dir": registry.images().dir().display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Schools:   {count}");
        println!("Database:  {}", storage.database.display());
        println!("Images:    {}", registry.images().dir().display());
    }
    Ok(())
}

/// Plain-text table, one school per line.
pub fn format_table(schools: &[School]) -> String {
    if schools.is_empty() {
        return "No schools registered.\n".to_owned();
    }

    let mut out = format!(
        "{:>5}  {:<30}  {:<20}  {:<16}  {:<14}  {:<30}  {}\n",
        "ID", "NAME", "CITY", "STATE", "CONTACT", "EMAIL", "CREATED"
    );
    for s in schools {
        out.push_str(&format!(
            "{:>5}  {:<30}  {:<20}  {:<16}  {:<14}  {:<30}  {}\n",
            s.id, s.name, s.city, s.state, s.contact, s.email_id, s.created_at
        ));
    }
    out
}
