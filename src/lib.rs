pub mod catalog;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod io_utils;
pub mod load;
pub mod normalize;
pub mod parse;
pub mod schema;
pub mod store;
pub mod table;

use std::{env, path::PathBuf, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use rusqlite::Connection;

use crate::catalog::Catalog;
use crate::cli::{Cli, Commands, FetchArgs, LoadArgs, RunArgs};
use crate::fetch::Layout;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("bbs_loader", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch(args) => handle_fetch(&args),
        Commands::Load(args) => handle_load(&args),
        Commands::Run(args) => handle_run(&args),
    }
}

fn handle_fetch(args: &FetchArgs) -> Result<()> {
    let catalog = build_catalog(args.base_url.as_deref(), None)?;
    let layout = Layout::new(&args.dir);
    layout.reset()?;
    fetch::fetch_catalog(&catalog, &layout)?;
    info!("Fetched {} release file(s)", catalog_file_count(&catalog));
    Ok(())
}

fn handle_load(args: &LoadArgs) -> Result<()> {
    let catalog = build_catalog(None, args.overrides.as_deref())?;
    let layout = Layout::new(&args.dir);
    let db_path = resolve_db_path(&layout, args.db.clone());
    let mut conn =
        Connection::open(&db_path).with_context(|| format!("Opening database {db_path:?}"))?;
    load::load_all(&mut conn, &layout, &catalog)?;
    info!("Database written to {:?}", db_path);
    Ok(())
}

fn handle_run(args: &RunArgs) -> Result<()> {
    handle_fetch(&FetchArgs {
        dir: args.dir.clone(),
        base_url: args.base_url.clone(),
    })?;
    handle_load(&LoadArgs {
        dir: args.dir.clone(),
        db: args.db.clone(),
        overrides: args.overrides.clone(),
    })
}

fn build_catalog(
    base_url: Option<&str>,
    overrides_path: Option<&std::path::Path>,
) -> Result<Catalog> {
    let mut catalog = Catalog::default();
    if let Some(url) = base_url {
        catalog.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = overrides_path {
        catalog.overrides = schema::load_overrides(path)?;
    }
    Ok(catalog)
}

fn resolve_db_path(layout: &Layout, db: Option<PathBuf>) -> PathBuf {
    db.unwrap_or_else(|| layout.db_path())
}

fn catalog_file_count(catalog: &Catalog) -> usize {
    catalog.fifty_stop_files.len() + catalog.meta_text_files.len() + catalog.meta_csv_files.len()
}
