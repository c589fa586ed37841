mod sign_up;
mod state;
mod theme;
mod ui;

use crate::config::AppConfig;
use crate::upload::{
    source, spawn_upload, Notice, UploadBatchManager, UploadClient, UploadOutcome,
};
use crate::Error;
use eframe::{egui, App};
pub use sign_up::{FieldProblem, SignUpForm};
pub use state::{Screen, UiState};
use std::path::{Path, PathBuf};
use std::sync::mpsc::TryRecvError;
use tracing::{info, warn};

pub struct ImageUploader {
    config: AppConfig,
    client: UploadClient,
    manager: UploadBatchManager,
    state: UiState,
}

impl ImageUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, client: UploadClient) -> Self {
        info!("Initializing image uploader for {}", client.url());
        Self {
            config,
            client,
            manager: UploadBatchManager::new(),
            state: UiState::default(),
        }
    }

    pub fn on_files_picked(&mut self, paths: Vec<PathBuf>) {
        let (files, failed) = source::load_all(&paths);
        self.add_loaded(files);
        self.report_unreadable(failed);
    }

    pub fn on_folder_picked(&mut self, folder: &Path) {
        let images = source::collect_images(folder);
        info!("Found {} image(s) in {}", images.len(), folder.display());
        self.on_files_picked(images);
    }

    pub fn on_files_dropped(&mut self, dropped: Vec<egui::DroppedFile>) {
        self.manager.set_drag_active(false);
        if self.manager.is_uploading() {
            warn!("Ignoring {} dropped item(s) during upload", dropped.len());
            self.manager.set_notice(Notice::BatchLocked {
                ignored: dropped.len(),
            });
            return;
        }

        let mut files = Vec::new();
        let mut failed = Vec::new();
        for file in dropped {
            match source::from_dropped(file.path.as_deref(), &file.name, file.bytes) {
                Some(Ok(pending)) => files.push(pending),
                Some(Err(e)) => {
                    warn!("Failed to read dropped file {}: {}", file.name, e);
                    failed.push((file.name, e.to_string()));
                }
                None => warn!("Dropped item {} carried no data", file.name),
            }
        }
        self.add_loaded(files);
        self.report_unreadable(failed);
    }

    pub fn on_hover_changed(&mut self, hovering: bool) {
        if self.manager.drag_active() != hovering {
            self.manager.set_drag_active(hovering);
        }
    }

    pub fn on_delete(&mut self, index: usize) {
        match self.manager.remove_file(index) {
            Ok(_) => self.state.on_file_removed(index),
            Err(e) => warn!("Delete ignored: {}", e),
        }
    }

    pub fn on_submit(&mut self, ctx: &egui::Context) {
        match self.manager.begin_submit() {
            Ok(job) => {
                let ctx = ctx.clone();
                self.state.upload_receiver = Some(spawn_upload(self.client.clone(), job, move || {
                    ctx.request_repaint()
                }));
            }
            Err(Error::EmptyBatch) | Err(Error::AlreadyUploading) => {}
            Err(e) => warn!("Submit failed: {}", e),
        }
    }

    pub fn on_upload_finished(&mut self, outcome: UploadOutcome) {
        self.state.upload_receiver = None;
        let notice = self.manager.finish_submit(outcome);
        info!("{}", notice.message());
    }

    fn add_loaded(&mut self, files: Vec<crate::upload::PendingFile>) {
        if files.is_empty() {
            return;
        }
        let offered = files.len();
        match self.manager.add_files(files) {
            Ok(_) => {}
            Err(Error::BatchLocked) => {
                warn!("Files not added: {}", Error::BatchLocked);
                self.manager.set_notice(Notice::BatchLocked { ignored: offered });
            }
            Err(e) => warn!("Files not added: {}", e),
        }
    }

    fn report_unreadable(&mut self, failures: Vec<(String, String)>) {
        if !failures.is_empty() {
            self.manager.set_notice(Notice::UnreadableFiles { failures });
        }
    }

    fn poll_upload(&mut self) {
        let Some(receiver) = &self.state.upload_receiver else {
            return;
        };
        match receiver.try_recv() {
            Ok(outcome) => self.on_upload_finished(outcome),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.on_upload_finished(
                UploadOutcome::TransportError("Upload worker stopped unexpectedly".to_string()),
            ),
        }
    }

    fn handle_file_input(&mut self, ctx: &egui::Context) {
        if self.state.screen != Screen::Upload {
            self.on_hover_changed(false);
            return;
        }

        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if !dropped.is_empty() {
            self.on_files_dropped(dropped);
        } else {
            // The drop zone stays unhighlighted while the batch is locked
            self.on_hover_changed(hovering && !self.manager.is_uploading());
        }
    }
}

impl App for ImageUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_upload();
        self.handle_file_input(ctx);
        self.render(ctx);
    }
}
