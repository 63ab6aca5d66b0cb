// src/store/mod.rs
//! The durable cache between `fetch` and `build`.
//!
//! One pretty-printed JSON document per page or database, named by its
//! normalized id, plus an `images/` side directory for downloaded assets.
//! Nothing else may live in the directory: a foreign file means the cache
//! is corrupt or belongs to something else, and loading it is refused.

use crate::constants::{ASSET_DIR_NAME, CACHE_FILE_EXTENSION};
use crate::error::AppError;
use crate::model::NotionObject;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle on a cache directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

/// Just enough of a document to check what it claims to be before the
/// full parse.
#[derive(Deserialize)]
struct ObjectHeader {
    #[serde(default)]
    object: Option<String>,
}

impl ContentStore {
    /// Points at `dir`. Nothing is touched on disk.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        ContentStore { root: dir.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Removes every cached entry and recreates the directory empty.
    pub fn clear(&self) -> Result<(), AppError> {
        if self.root.exists() {
            log::info!("Clearing cache at {}", self.root.display());
            fs::remove_dir_all(&self.root)?;
        }
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Path of the document for a node id.
    pub fn node_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, CACHE_FILE_EXTENSION))
    }

    /// Persists one node. Overwrites an earlier document for the same id.
    pub fn write_node(&self, node: &NotionObject) -> Result<PathBuf, AppError> {
        let path = self.node_path(node.id().as_str());
        let json = serde_json::to_string_pretty(node).map_err(|source| {
            AppError::JsonParseError {
                path: path.clone(),
                source,
            }
        })?;

        fs::create_dir_all(&self.root)?;
        fs::write(&path, json)?;
        log::debug!("Cached {} {}", node.object_type_name(), node.id());
        Ok(path)
    }

    /// The asset side directory, created on demand.
    pub fn asset_dir(&self) -> Result<PathBuf, AppError> {
        let dir = self.root.join(ASSET_DIR_NAME);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Writes a downloaded asset. Returns its path relative to the cache
    /// root, which is also its path relative to the built site.
    pub fn write_asset(&self, file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let path = self.asset_dir()?.join(file_name);
        fs::write(&path, bytes)?;
        log::debug!("Stored asset {} ({} bytes)", path.display(), bytes.len());
        Ok(format!("{}/{}", ASSET_DIR_NAME, file_name))
    }

    /// The asset directory if anything was ever downloaded into it.
    pub fn existing_asset_dir(&self) -> Option<PathBuf> {
        let dir = self.root.join(ASSET_DIR_NAME);
        dir.is_dir().then_some(dir)
    }

    /// Reads every cached node, sorted by file name.
    ///
    /// Fails on any entry that is not a page or database document or the
    /// asset directory.
    pub fn read_all(&self) -> Result<Vec<NotionObject>, AppError> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_dir() {
                if entry.file_name() == ASSET_DIR_NAME {
                    continue;
                }
                log::error!("Foreign directory in cache: {}", path.display());
                return Err(AppError::UnexpectedCacheEntry { path });
            }

            if path.extension().and_then(|ext| ext.to_str()) != Some(CACHE_FILE_EXTENSION) {
                log::error!("Foreign file in cache: {}", path.display());
                return Err(AppError::UnexpectedCacheEntry { path });
            }
            paths.push(path);
        }
        paths.sort();

        let nodes = paths
            .iter()
            .map(|path| read_node(path))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Read {} cached nodes from {}",
            nodes.len(),
            self.root.display()
        );
        Ok(nodes)
    }
}

fn read_node(path: &Path) -> Result<NotionObject, AppError> {
    let raw = fs::read_to_string(path)?;
    let parse_error = |source| AppError::JsonParseError {
        path: path.to_path_buf(),
        source,
    };

    let header: ObjectHeader = serde_json::from_str(&raw).map_err(parse_error)?;
    match header.object.as_deref() {
        Some("page") | Some("database") => serde_json::from_str(&raw).map_err(parse_error),
        other => {
            log::error!(
                "Cache entry {} has object type {:?}",
                path.display(),
                other
            );
            Err(AppError::UnexpectedCacheEntry {
                path: path.to_path_buf(),
            })
        }
    }
}
