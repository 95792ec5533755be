use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Fetch Breeding Bird Survey releases into SQLite", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download and extract the survey release files
    Fetch(FetchArgs),
    /// Parse previously fetched files and load them into the database
    Load(LoadArgs),
    /// Fetch everything, then load it
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Working directory for downloaded data and the database
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,
    /// Base URL of the release file server (defaults to the USGS server)
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Working directory holding previously fetched data
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,
    /// Database file path (defaults to bird_survey_db.sqlite3 under the working directory)
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// JSON file mapping column names to forced column types
    #[arg(long)]
    pub overrides: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Working directory for downloaded data and the database
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,
    /// Base URL of the release file server (defaults to the USGS server)
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
    /// Database file path (defaults to bird_survey_db.sqlite3 under the working directory)
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// JSON file mapping column names to forced column types
    #[arg(long)]
    pub overrides: Option<PathBuf>,
}
