use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::accounting::{ChartSeries, Person, Store};

pub const DEFAULT_STORE_FILE: &str = "spese.json";

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} does not contain a valid expense store: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize expense store: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ChartRecord<'a> {
    #[serde(rename = "category")]
    pub label: &'a str,
    pub giulio: Decimal,
    pub delia: Decimal,
}

/// Loads the store from `path`, falling back to the seed data when the file does not exist.
///
/// A file that exists but cannot be parsed is reported, never replaced.
pub fn load_store(path: &Path) -> Result<Store, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("no store at {}, starting from default data", path.display());
            return Ok(Store::seeded());
        },
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        },
    };

    debug!("loaded {} bytes from {}", contents.len(), path.display());
    serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the file at `path` with the full store.
pub fn save_store(store: &Store, path: &Path) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(store)?;
    let write_error = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, json).map_err(write_error)?;
    fs::rename(&tmp, path).map_err(write_error)?;

    debug!("saved store to {}", path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".");
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}

/// Writes the aligned chart series as CSV, one row per category.
pub fn export_csv<W: Write>(series: &ChartSeries, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    let giulio = series.values(Person::Giulio);
    let delia = series.values(Person::Delia);

    for (index, label) in series.labels().iter().enumerate() {
        csv_writer.serialize(ChartRecord {
            label: label.as_str(),
            giulio: giulio[index],
            delia: delia[index],
        })?;
    }

    csv_writer.flush()?;

    Ok(())
}
