mod batch;
mod client;
mod manager;
mod preview;
pub mod source;
mod types;
mod worker;

pub use batch::UploadBatch;
pub use client::UploadClient;
pub use manager::UploadBatchManager;
pub use preview::{decode_thumbnail, Preview, PREVIEW_EDGE};
pub use types::{Notice, PendingFile, SessionState, UploadJob, UploadOutcome, UploadPart};
pub use worker::spawn_upload;
