use super::batch::UploadBatch;
use super::client::UploadClient;
use super::types::{Notice, PendingFile, SessionState, UploadJob, UploadOutcome};
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Owns the staged files and drives a submission through
/// `Idle -> Uploading -> Idle`.
///
/// Only one submission may be in flight. The batch is locked while it is
/// being sent, so a successful upload clears exactly the files that went out.
#[derive(Debug, Default)]
pub struct UploadBatchManager {
    batch: UploadBatch,
    session: SessionState,
    drag_active: bool,
    notice: Option<Notice>,
    in_flight: usize,
}

impl UploadBatchManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self) -> &UploadBatch {
        &self.batch
    }

    /// Mutable access for lazily attaching previews. Order and length stay fixed.
    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut PendingFile> {
        self.batch.iter_mut()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn is_uploading(&self) -> bool {
        self.session == SessionState::Uploading
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = PendingFile>) -> Result<usize> {
        if self.is_uploading() {
            return Err(Error::BatchLocked);
        }
        let added = self.batch.extend(files);
        debug!("Added {} file(s), batch now holds {}", added, self.batch.len());
        Ok(added)
    }

    pub fn remove_file(&mut self, index: usize) -> Result<PendingFile> {
        if self.is_uploading() {
            return Err(Error::BatchLocked);
        }
        let removed = self.batch.remove(index)?;
        debug!("Removed '{}' at position {}", removed.name(), index);
        Ok(removed)
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    /// Validates the preconditions and moves to `Uploading`.
    pub fn begin_submit(&mut self) -> Result<UploadJob> {
        if self.is_uploading() {
            warn!("Submit ignored: an upload is already in progress");
            return Err(Error::AlreadyUploading);
        }
        if self.batch.is_empty() {
            info!("Submit ignored: no files selected");
            self.notice = Some(Notice::NoFilesSelected);
            return Err(Error::EmptyBatch);
        }

        let job = self.batch.to_job();
        self.session = SessionState::Uploading;
        self.in_flight = job.len();
        self.notice = None;
        info!(
            "Submitting {} file(s), {} bytes",
            job.len(),
            self.batch.total_size()
        );
        Ok(job)
    }

    /// Applies a terminal response. Every outcome returns the session to `Idle`.
    pub fn finish_submit(&mut self, outcome: UploadOutcome) -> &Notice {
        if !self.is_uploading() {
            warn!("Received an upload result with no submission in flight");
        }

        let notice = match outcome {
            UploadOutcome::Success { status } => {
                info!("Upload accepted with status {}", status);
                self.batch.clear();
                Notice::Uploaded {
                    count: self.in_flight,
                }
            }
            UploadOutcome::ServerError { status } => {
                warn!("Upload rejected with status {}", status);
                Notice::ServerError { status }
            }
            UploadOutcome::TransportError(message) => {
                warn!("Upload failed: {}", message);
                Notice::TransportError { message }
            }
        };

        self.session = SessionState::Idle;
        self.in_flight = 0;
        self.notice.insert(notice)
    }

    /// Runs a whole submission against `client`.
    pub async fn submit(&mut self, client: &UploadClient) -> Result<Notice> {
        let job = self.begin_submit()?;
        let outcome = client.send(&job).await;
        Ok(self.finish_submit(outcome).clone())
    }
}
