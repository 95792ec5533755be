//! Download and extraction plumbing for the release files.
//!
//! Single-threaded and sequential: each file is fully downloaded (and
//! extracted, for archives) before the next begins. Retry and resume are
//! out of scope; a failed transfer fails the run.

use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use log::info;

use crate::catalog::{Catalog, DB_FILE};

/// Local directory layout under the working directory:
///
/// ```text
/// data/
///   fifty_stops/   extracted count CSVs plus their zip archives
///   meta/          metadata text files and extracted metadata CSVs
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn fifty_stop_dir(&self) -> PathBuf {
        self.data_dir().join("fifty_stops")
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.data_dir().join("meta")
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    /// Removes any previous database and data directories, then recreates
    /// the directory tree. A fetch always starts from a clean slate.
    pub fn reset(&self) -> Result<()> {
        let db = self.db_path();
        if db.is_file() {
            fs::remove_file(&db).with_context(|| format!("Removing {db:?}"))?;
        }
        for dir in [self.data_dir(), self.fifty_stop_dir(), self.meta_dir()] {
            if dir.is_dir() {
                fs::remove_dir_all(&dir).with_context(|| format!("Removing {dir:?}"))?;
            }
            fs::create_dir(&dir).with_context(|| format!("Creating {dir:?}"))?;
        }
        Ok(())
    }
}

/// Joins a base URL with relative path pieces, skipping empty ones.
pub fn absolute_url(base: &str, pieces: &[&str]) -> String {
    let mut parts = vec![base.trim_end_matches('/')];
    parts.extend(pieces.iter().filter(|piece| !piece.is_empty()));
    parts.join("/")
}

/// Downloads `url` to `local`, then extracts it when `unzip_dir` is given.
pub fn fetch_file(url: &str, local: &Path, unzip_dir: Option<&Path>) -> Result<()> {
    info!("Downloading {url}");
    let response = ureq::get(url).call().with_context(|| format!("GET {url}"))?;
    let mut file = File::create(local).with_context(|| format!("Creating {local:?}"))?;
    io::copy(&mut response.into_reader(), &mut file)
        .with_context(|| format!("Writing {local:?}"))?;
    info!("Saved {:?}", local);
    if let Some(dir) = unzip_dir {
        unzip_file(local, dir)?;
    }
    Ok(())
}

/// Extracts a downloaded zip archive into an existing directory.
pub fn unzip_file(archive: &Path, target: &Path) -> Result<()> {
    ensure!(target.is_dir(), "unzip target {target:?} does not exist");
    info!("Extracting {:?}", archive);
    let file = File::open(archive).with_context(|| format!("Opening archive {archive:?}"))?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("Reading archive {archive:?}"))?;
    zip.extract(target)
        .with_context(|| format!("Extracting {archive:?} into {target:?}"))?;
    Ok(())
}

fn fetch_file_list(
    base_url: &str,
    rel_path: &str,
    files: &[String],
    local_dir: &Path,
    unzip_dir: Option<&Path>,
) -> Result<()> {
    for name in files {
        let url = absolute_url(base_url, &[rel_path, name.as_str()]);
        let local = local_dir.join(name);
        fetch_file(&url, &local, unzip_dir)?;
    }
    Ok(())
}

/// Fetches every file in the catalog into the local layout.
pub fn fetch_catalog(catalog: &Catalog, layout: &Layout) -> Result<()> {
    let fifty_dir = layout.fifty_stop_dir();
    fetch_file_list(
        &catalog.base_url,
        &catalog.fifty_stop_path,
        &catalog.fifty_stop_files,
        &fifty_dir,
        Some(&fifty_dir),
    )?;
    let meta_dir = layout.meta_dir();
    fetch_file_list(
        &catalog.base_url,
        "",
        &catalog.meta_text_files,
        &meta_dir,
        None,
    )?;
    fetch_file_list(
        &catalog.base_url,
        "",
        &catalog.meta_csv_files,
        &meta_dir,
        Some(&meta_dir),
    )?;
    Ok(())
}
