use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::domain::StockLevels;

/// Default inventory file, relative to the working directory.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";

const INDENT: &[u8] = b"    ";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Error decoding JSON in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// JSON file holding the stock levels as a flat `{ "item": quantity }` object.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_INVENTORY_FILE)
    }
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StockLevels, StorageError> {
        load_levels(&self.path)
    }

    pub fn save(&self, levels: &StockLevels) -> Result<(), StorageError> {
        save_levels(&self.path, levels)
    }
}

/// Read stock levels from `path`.
pub fn load_levels(path: &Path) -> Result<StockLevels, StorageError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
        _ => StorageError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            StorageError::Io {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            StorageError::Corrupt {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Overwrite `path` with the given stock levels, indented by four spaces.
pub fn save_levels(path: &Path, levels: &StockLevels) -> Result<(), StorageError> {
    let io_err = |source: io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_levels(&mut writer, levels).map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// Serialize stock levels as pretty JSON into any writer.
pub fn write_levels<W: Write>(writer: W, levels: &StockLevels) -> io::Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    levels.serialize(&mut serializer).map_err(io::Error::from)
}
