use super::sign_up::SignUpForm;
use crate::upload::UploadOutcome;
use derivative::Derivative;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Upload,
    SignUp,
}

/// View state that is not part of the upload session.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct UiState {
    pub screen: Screen,
    /// Batch position shown in the preview window.
    pub preview_open: Option<usize>,
    pub sign_up: SignUpForm,
    #[derivative(Debug = "ignore")]
    pub upload_receiver: Option<Receiver<UploadOutcome>>,
}

impl UiState {
    /// Keeps the preview window pointing at the same file after a removal.
    pub fn on_file_removed(&mut self, index: usize) {
        self.preview_open = match self.preview_open {
            Some(open) if open == index => None,
            Some(open) if open > index => Some(open - 1),
            other => other,
        };
    }
}
