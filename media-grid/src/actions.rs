//! Command menu below the grid and the single outbound event it produces.

use crate::error::PickerError;
use crate::localization::{ButtonLabel, Localizer};
use crate::models::{CameraHandle, Contact, Location, PhotoAsset};
use crate::selection::SelectionSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PhotoOrVideo,
    File,
    Location,
    Contact,
    SendPhotos,
    DocumentAsFile,
    PhotoAsFile,
}

impl Command {
    /// Emphasized commands are drawn bold
    pub fn is_emphasized(&self) -> bool {
        matches!(self, Command::SendPhotos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
    #[default]
    Browsing,
    DocumentMenu,
}

/// External pickers the host presents on behalf of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPicker {
    PhotoLibrary,
    PhotoLibraryAsFiles,
    Location,
    Contact,
}

/// What an external picker reported back
#[derive(Debug, Clone, PartialEq)]
pub enum SubPickerResult {
    Photos(Vec<PhotoAsset>),
    PhotosAsFiles(Vec<PhotoAsset>),
    Location(Option<Location>),
    Contact(Option<Contact>),
}

impl SubPickerResult {
    fn picker(&self) -> SubPicker {
        match self {
            SubPickerResult::Photos(_) => SubPicker::PhotoLibrary,
            SubPickerResult::PhotosAsFiles(_) => SubPicker::PhotoLibraryAsFiles,
            SubPickerResult::Location(_) => SubPicker::Location,
            SubPickerResult::Contact(_) => SubPicker::Contact,
        }
    }
}

/// Terminal event delivered to the host, exactly once per session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Outbound {
    PhotoSelection(Vec<PhotoAsset>),
    PhotoAsDocuments(Vec<PhotoAsset>),
    CameraStream(CameraHandle),
    DocumentRequested,
    LocationPicked(Option<Location>),
    ContactPicked(Option<Contact>),
}

impl Outbound {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Result of invoking a command
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    EnterDocumentMenu,
    Open(SubPicker),
    Emit(Outbound),
}

#[derive(Debug, Clone, Default)]
pub struct ActionRouter {
    state: RouterState,
    document_menu: bool,
    pending: Option<SubPicker>,
    finished: bool,
}

impl ActionRouter {
    pub fn new(document_menu: bool) -> Self {
        Self {
            document_menu,
            ..Self::default()
        }
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending(&self) -> Option<SubPicker> {
        self.pending
    }

    /// Commands offered for the current state and selection
    pub fn commands(&self, selection: &SelectionSet) -> Vec<Command> {
        match self.state {
            RouterState::DocumentMenu => vec![Command::DocumentAsFile, Command::PhotoAsFile],
            RouterState::Browsing if !selection.is_empty() => vec![Command::SendPhotos],
            RouterState::Browsing => {
                let mut commands = vec![Command::PhotoOrVideo];
                if self.document_menu {
                    commands.push(Command::File);
                }
                commands.extend([Command::Location, Command::Contact]);
                commands
            }
        }
    }

    pub fn label(
        &self,
        command: Command,
        selection: &SelectionSet,
        localizer: &dyn Localizer,
    ) -> String {
        let label = match command {
            Command::PhotoOrVideo => ButtonLabel::PhotoOrVideo,
            Command::File => ButtonLabel::File,
            Command::Location => ButtonLabel::Location,
            Command::Contact => ButtonLabel::Contact,
            Command::SendPhotos => ButtonLabel::for_selection(&selection.assets()),
            Command::DocumentAsFile => ButtonLabel::SendDocumentAsFile,
            Command::PhotoAsFile => ButtonLabel::SendPhotoAsFile,
        };
        localizer.button(&label)
    }

    pub fn invoke(
        &mut self,
        command: Command,
        selection: &SelectionSet,
    ) -> Result<Route, PickerError> {
        self.ensure_open()?;
        if !self.commands(selection).contains(&command) {
            log::warn!("Command {:?} not offered in {:?}", command, self.state);
            return Err(PickerError::Underlying(format!(
                "{:?} is not available",
                command
            )));
        }

        log::debug!("Invoking {:?}", command);
        let route = match command {
            Command::File => {
                self.state = RouterState::DocumentMenu;
                Route::EnterDocumentMenu
            }
            Command::SendPhotos => self.emit(Outbound::PhotoSelection(selection.assets())),
            Command::DocumentAsFile => self.emit(Outbound::DocumentRequested),
            Command::PhotoOrVideo => self.open(SubPicker::PhotoLibrary),
            Command::PhotoAsFile => self.open(SubPicker::PhotoLibraryAsFiles),
            Command::Location => self.open(SubPicker::Location),
            Command::Contact => self.open(SubPicker::Contact),
        };
        Ok(route)
    }

    /// Finishes a command that went through an external picker
    pub fn complete(&mut self, result: SubPickerResult) -> Result<Outbound, PickerError> {
        self.ensure_open()?;
        if self.pending != Some(result.picker()) {
            return Err(PickerError::Underlying(format!(
                "no {:?} picker is open",
                result.picker()
            )));
        }
        let outbound = match result {
            SubPickerResult::Photos(assets) => Outbound::PhotoSelection(assets),
            SubPickerResult::PhotosAsFiles(assets) => Outbound::PhotoAsDocuments(assets),
            SubPickerResult::Location(location) => Outbound::LocationPicked(location),
            SubPickerResult::Contact(contact) => Outbound::ContactPicked(contact),
        };
        self.finish();
        Ok(outbound)
    }

    /// The user dismissed an external picker without a result
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Camera cell tapped while a live preview is bound
    pub fn camera(&mut self, handle: CameraHandle) -> Result<Outbound, PickerError> {
        self.ensure_open()?;
        self.finish();
        Ok(Outbound::CameraStream(handle))
    }

    fn ensure_open(&self) -> Result<(), PickerError> {
        if self.finished {
            log::warn!("Picker action after the outbound event was delivered");
            return Err(PickerError::SessionFinished);
        }
        Ok(())
    }

    fn open(&mut self, picker: SubPicker) -> Route {
        self.pending = Some(picker);
        Route::Open(picker)
    }

    fn emit(&mut self, outbound: Outbound) -> Route {
        self.finish();
        Route::Emit(outbound)
    }

    fn finish(&mut self) {
        self.finished = true;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::EnglishLocalizer;

    fn selection_of(ids: &[&str]) -> SelectionSet {
        let mut set = SelectionSet::default();
        for id in ids {
            set.toggle(&PhotoAsset::image(*id, 1, 1));
        }
        set
    }

    #[test]
    fn test_browsing_commands() {
        let router = ActionRouter::new(true);
        assert_eq!(
            router.commands(&SelectionSet::default()),
            vec![
                Command::PhotoOrVideo,
                Command::File,
                Command::Location,
                Command::Contact
            ]
        );
        assert_eq!(router.commands(&selection_of(&["a"])), vec![Command::SendPhotos]);
        assert!(!ActionRouter::new(false)
            .commands(&SelectionSet::default())
            .contains(&Command::File));
    }

    #[test]
    fn test_file_enters_document_menu() {
        let mut router = ActionRouter::new(true);
        let route = router.invoke(Command::File, &SelectionSet::default()).unwrap();
        assert_eq!(route, Route::EnterDocumentMenu);
        assert_eq!(router.state(), RouterState::DocumentMenu);
        assert_eq!(
            router.commands(&SelectionSet::default()),
            vec![Command::DocumentAsFile, Command::PhotoAsFile]
        );
        assert!(!router.is_finished());
    }

    #[test]
    fn test_send_emits_selection_in_order() {
        let mut router = ActionRouter::new(true);
        let selection = selection_of(&["b", "a"]);
        let route = router.invoke(Command::SendPhotos, &selection).unwrap();
        match route {
            Route::Emit(Outbound::PhotoSelection(assets)) => {
                let ids: Vec<_> = assets.iter().map(|a| a.id.as_str()).collect();
                assert_eq!(ids, vec!["b", "a"]);
            }
            other => panic!("unexpected route {:?}", other),
        }
        assert!(router.is_finished());
    }

    #[test]
    fn test_only_one_outbound_event() {
        let mut router = ActionRouter::new(true);
        router.invoke(Command::File, &SelectionSet::default()).unwrap();
        router
            .invoke(Command::DocumentAsFile, &SelectionSet::default())
            .unwrap();
        assert_eq!(
            router.invoke(Command::DocumentAsFile, &SelectionSet::default()),
            Err(PickerError::SessionFinished)
        );
        assert!(router.camera(CameraHandle::new(uuid::Uuid::new_v4())).is_err());
    }

    #[test]
    fn test_sub_picker_round_trip() {
        let mut router = ActionRouter::new(true);
        let route = router.invoke(Command::Location, &SelectionSet::default()).unwrap();
        assert_eq!(route, Route::Open(SubPicker::Location));
        assert!(router.complete(SubPickerResult::Contact(None)).is_err());

        let outbound = router.complete(SubPickerResult::Location(None)).unwrap();
        assert_eq!(outbound, Outbound::LocationPicked(None));
        assert!(router.is_finished());
    }

    #[test]
    fn test_unavailable_command_rejected() {
        let mut router = ActionRouter::new(true);
        assert!(router
            .invoke(Command::SendPhotos, &SelectionSet::default())
            .is_err());
        assert!(!router.is_finished());
    }

    #[test]
    fn test_labels() {
        let router = ActionRouter::new(true);
        let l = EnglishLocalizer;
        assert_eq!(
            router.label(Command::SendPhotos, &selection_of(&["a", "b"]), &l),
            "Send 2 Photos"
        );
        assert_eq!(
            router.label(Command::PhotoOrVideo, &SelectionSet::default(), &l),
            "Photo or Video"
        );
    }

    #[test]
    fn test_document_menu_labels() {
        let mut router = ActionRouter::new(true);
        router.invoke(Command::File, &SelectionSet::default()).unwrap();
        let l = EnglishLocalizer;
        let labels: Vec<_> = router
            .commands(&SelectionSet::default())
            .into_iter()
            .map(|c| router.label(c, &SelectionSet::default(), &l))
            .collect();
        assert_eq!(labels, vec!["Document", "Send as Files"]);
    }

    #[test]
    fn test_outbound_json() {
        let json = Outbound::DocumentRequested.to_json().unwrap();
        assert_eq!(json, r#"{"type":"document_requested"}"#);
    }
}
