use super::client::UploadClient;
use super::types::{UploadJob, UploadOutcome};
use std::sync::mpsc::{channel, Receiver};
use tracing::error;

/// Runs `job` on a background thread with its own runtime.
///
/// The outcome arrives on the returned receiver; `on_done` fires after it is
/// sent so the UI can repaint.
pub fn spawn_upload<F>(client: UploadClient, job: UploadJob, on_done: F) -> Receiver<UploadOutcome>
where
    F: FnOnce() + Send + 'static,
{
    let (sender, receiver) = channel();

    std::thread::spawn(move || {
        let outcome = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(client.send(&job)),
            Err(e) => {
                error!("Failed to start upload runtime: {}", e);
                UploadOutcome::TransportError(format!("Failed to start upload runtime: {}", e))
            }
        };
        // The app may have shut down
        let _ = sender.send(outcome);
        on_done();
    });

    receiver
}
