use super::types::PendingFile;
use crate::config::ACCEPTED_EXTENSIONS;
use crate::Result;
use ignore::Walk;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

impl PendingFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = fs::read(path)?;
        debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
        let mut file = Self::from_bytes(name, bytes);
        file.source = Some(path.to_path_buf());
        Ok(file)
    }
}

pub fn is_accepted_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Image files under `folder`, skipping anything `.gitignore` excludes.
pub fn collect_images(folder: &Path) -> Vec<PathBuf> {
    let mut images = Vec::new();
    for entry in Walk::new(folder) {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && is_accepted_image(path) {
                    images.push(path.to_path_buf());
                }
            }
            Err(e) => warn!("Error walking {}: {}", folder.display(), e),
        }
    }
    images.sort();
    images
}

/// Loads every path, keeping the files that could be read and reporting
/// the rest as `(name, error)` pairs.
pub fn load_all(paths: &[PathBuf]) -> (Vec<PendingFile>, Vec<(String, String)>) {
    let mut loaded = Vec::new();
    let mut failed = Vec::new();
    for path in paths {
        match PendingFile::from_path(path) {
            Ok(file) => loaded.push(file),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                failed.push((name, e.to_string()));
            }
        }
    }
    (loaded, failed)
}

/// Builds a pending file from a drag-and-drop payload.
pub fn from_dropped(
    path: Option<&Path>,
    name: &str,
    bytes: Option<Arc<[u8]>>,
) -> Option<Result<PendingFile>> {
    match (path, bytes) {
        (Some(path), _) => Some(PendingFile::from_path(path)),
        (None, Some(bytes)) => Some(Ok(PendingFile::from_bytes(name, bytes))),
        (None, None) => None,
    }
}
