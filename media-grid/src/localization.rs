use crate::error::{Permission, PickerError};
use crate::models::{MediaKind, PhotoAsset};

/// Text tags for the command menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonLabel {
    PhotoOrVideo,
    File,
    Location,
    Contact,
    Photos { count: usize },
    Videos { count: usize },
    Medias { count: usize },
    SendDocumentAsFile,
    /// Opens a multi-photo picker, so the label is always plural
    SendPhotoAsFile,
    AddContact,
}

impl ButtonLabel {
    /// Send label for a selection, named after the kinds it contains
    pub fn for_selection(selected: &[PhotoAsset]) -> Self {
        let count = selected.len();
        let videos = selected
            .iter()
            .filter(|a| a.kind == MediaKind::Video)
            .count();
        if videos == 0 {
            ButtonLabel::Photos { count }
        } else if videos == count {
            ButtonLabel::Videos { count }
        } else {
            ButtonLabel::Medias { count }
        }
    }
}

/// Failure tags shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NoAccessToCamera,
    NoAccessToPhoto,
    Error(String),
}

impl From<&PickerError> for FailureKind {
    fn from(err: &PickerError) -> Self {
        match err {
            PickerError::PermissionDenied(Permission::Camera) => FailureKind::NoAccessToCamera,
            PickerError::PermissionDenied(Permission::PhotoLibrary) => FailureKind::NoAccessToPhoto,
            PickerError::Underlying(msg) => FailureKind::Error(msg.clone()),
            other => FailureKind::Error(other.to_string()),
        }
    }
}

/// Display text for commands and failures
pub trait Localizer {
    fn button(&self, label: &ButtonLabel) -> String;
    fn failure(&self, failure: &FailureKind) -> String;
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("Send {} {}", count, if count == 1 { one } else { many })
}

/// Built-in English texts
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn button(&self, label: &ButtonLabel) -> String {
        match label {
            ButtonLabel::PhotoOrVideo => "Photo or Video".to_string(),
            ButtonLabel::File => "File".to_string(),
            ButtonLabel::Location => "Location".to_string(),
            ButtonLabel::Contact => "Contact".to_string(),
            ButtonLabel::Photos { count } => plural(*count, "Photo", "Photos"),
            ButtonLabel::Videos { count } => plural(*count, "Video", "Videos"),
            ButtonLabel::Medias { count } => plural(*count, "Media", "Medias"),
            ButtonLabel::SendDocumentAsFile => "Document".to_string(),
            ButtonLabel::SendPhotoAsFile => "Send as Files".to_string(),
            ButtonLabel::AddContact => "Add Contact".to_string(),
        }
    }

    fn failure(&self, failure: &FailureKind) -> String {
        match failure {
            FailureKind::NoAccessToCamera => {
                "The app does not have access to the camera. Please allow camera access in the settings."
                    .to_string()
            }
            FailureKind::NoAccessToPhoto => {
                "The app does not have access to your photo library. Please allow access in the settings."
                    .to_string()
            }
            FailureKind::Error(msg) => format!("Error: {}", msg),
        }
    }
}
