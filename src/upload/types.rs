use derivative::Derivative;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::preview::Preview;

/// A file staged for upload.
///
/// Identity is positional: two entries with the same name and bytes are
/// still two entries.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct PendingFile {
    pub(super) name: String,
    pub(super) mime: String,
    #[derivative(Debug = "ignore")]
    pub(super) bytes: Arc<[u8]>,
    pub(super) source: Option<PathBuf>,
    /// Created on first render, released with the entry.
    #[derivative(Debug = "ignore")]
    pub(super) preview: Option<Preview>,
}

impl PendingFile {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let mime = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            mime,
            bytes: bytes.into(),
            source: None,
            preview: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Where the file was loaded from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Uploading,
}

/// User-facing notification shown in the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoFilesSelected,
    Uploaded { count: usize },
    ServerError { status: u16 },
    TransportError { message: String },
    /// `(name, reason)` for every file that could not be read.
    UnreadableFiles { failures: Vec<(String, String)> },
    /// Files offered while a submission was in flight.
    BatchLocked { ignored: usize },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NoFilesSelected => {
                "No image files detected. Please upload some images first and try again."
                    .to_string()
            }
            Notice::Uploaded { count } => format!("Successfully uploaded {} image(s)!", count),
            Notice::ServerError { status } => format!(
                "There was a server error during image upload (status {}).",
                status
            ),
            Notice::TransportError { .. } => {
                "An error occurred while uploading the images; please try again later.".to_string()
            }
            Notice::UnreadableFiles { failures } => match failures.as_slice() {
                [(name, reason)] => format!("Could not read {}: {}", name, reason),
                _ => {
                    let names: Vec<&str> = failures.iter().map(|(name, _)| name.as_str()).collect();
                    format!(
                        "{} files could not be read: {}",
                        failures.len(),
                        names.join(", ")
                    )
                }
            },
            Notice::BatchLocked { ignored } => format!(
                "Files cannot be added while an upload is in progress ({} ignored).",
                ignored
            ),
        }
    }

    /// Secondary line shown under the message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Notice::TransportError { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Uploaded { .. })
    }
}

/// One multipart part of a submission.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct UploadPart {
    pub file_name: String,
    pub mime: String,
    #[derivative(Debug = "ignore")]
    pub bytes: Arc<[u8]>,
}

/// Snapshot of the batch taken when a submission starts.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub parts: Vec<UploadPart>,
}

impl UploadJob {
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Terminal result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { status: u16 },
    ServerError { status: u16 },
    TransportError(String),
}
