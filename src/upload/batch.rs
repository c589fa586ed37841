use super::types::{PendingFile, UploadJob, UploadPart};
use crate::{Error, Result};

/// Ordered files staged for upload. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    files: Vec<PendingFile>,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, files: impl IntoIterator<Item = PendingFile>) -> usize {
        let before = self.files.len();
        self.files.extend(files);
        self.files.len() - before
    }

    /// Removes the entry at `index`, shifting later entries down by one.
    pub fn remove(&mut self, index: usize) -> Result<PendingFile> {
        let len = self.files.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PendingFile> {
        self.files.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingFile> {
        self.files.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PendingFile> {
        self.files.iter_mut()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(PendingFile::name).collect()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(PendingFile::size).sum()
    }

    pub fn to_job(&self) -> UploadJob {
        UploadJob {
            parts: self
                .files
                .iter()
                .map(|file| UploadPart {
                    file_name: file.name.clone(),
                    mime: file.mime.clone(),
                    bytes: file.bytes.clone(),
                })
                .collect(),
        }
    }
}
