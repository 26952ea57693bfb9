//! One picker session: the presenter's update loop.
//!
//! All methods run on the UI thread. Background results arrive through the
//! [`UiInbox`] returned by [`PickerSession::new`] and are applied with
//! [`PickerSession::handle`].

use crate::actions::{ActionRouter, Command, Outbound, Route, SubPicker, SubPickerResult};
use crate::config::PickerConfig;
use crate::dispatch::{Dispatcher, UiInbox, UiMessage};
use crate::error::PickerError;
use crate::localization::Localizer;
use crate::presenter::{GridPresenter, Tap, ThumbnailRequest};
use crate::selection::SelectionChange;
use crate::source::{AssetSource, CameraSource};
use std::sync::Arc;
use tokio::runtime::Handle;

/// What the host has to react to after a UI operation
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Nothing,
    Selection(SelectionChange),
    DocumentMenu,
    Open(SubPicker),
    Outbound(Outbound),
}

pub struct PickerSession {
    presenter: GridPresenter,
    router: ActionRouter,
    dispatcher: Dispatcher,
    assets: Arc<dyn AssetSource>,
    camera: Arc<dyn CameraSource>,
    camera_enabled: bool,
    failures: Vec<PickerError>,
    outbound: Option<Outbound>,
    fetch_pending: bool,
}

impl PickerSession {
    pub fn new(
        config: &PickerConfig,
        assets: Arc<dyn AssetSource>,
        camera: Arc<dyn CameraSource>,
        runtime: Handle,
    ) -> (Self, UiInbox) {
        let (dispatcher, inbox) = Dispatcher::new(runtime);
        let session = Self {
            presenter: GridPresenter::new(config),
            router: ActionRouter::new(config.document_menu),
            dispatcher,
            assets,
            camera,
            camera_enabled: config.camera_enabled,
            failures: Vec::new(),
            outbound: None,
            fetch_pending: false,
        };
        (session, inbox)
    }

    /// Kicks off the asset fetch and camera setup
    pub fn start(&mut self) {
        self.fetch_pending = true;
        self.dispatcher.fetch_assets(Arc::clone(&self.assets));
        if self.camera_enabled {
            self.dispatcher.start_camera(Arc::clone(&self.camera));
        }
    }

    pub fn presenter(&self) -> &GridPresenter {
        &self.presenter
    }

    pub fn router(&self) -> &ActionRouter {
        &self.router
    }

    /// True from [`start`](Self::start) until the asset fetch reports back
    pub fn is_loading(&self) -> bool {
        self.fetch_pending
    }

    pub fn outbound(&self) -> Option<&Outbound> {
        self.outbound.as_ref()
    }

    pub fn failures(&self) -> &[PickerError] {
        &self.failures
    }

    /// Failures not yet shown to the user; each is reported once
    pub fn take_failures(&mut self) -> Vec<PickerError> {
        std::mem::take(&mut self.failures)
    }

    /// Offered commands with their display text
    pub fn commands(&self, localizer: &dyn Localizer) -> Vec<(Command, String)> {
        let selection = self.presenter.selection().selection();
        self.router
            .commands(selection)
            .into_iter()
            .map(|c| (c, self.router.label(c, selection, localizer)))
            .collect()
    }

    /// Applies a background result
    pub fn handle(&mut self, message: UiMessage) {
        match message {
            UiMessage::ThumbnailResolved(result) => {
                self.presenter.apply_thumbnail(result);
            }
            UiMessage::AssetsFetched(Ok(assets)) => {
                self.fetch_pending = false;
                let requests = self.presenter.replace_items(assets);
                self.resolve(requests);
            }
            UiMessage::AssetsFetched(Err(err)) => {
                self.fetch_pending = false;
                log::warn!("Asset fetch failed: {}", err);
                self.failures.push(err);
            }
            UiMessage::CameraReady(Ok(handle)) => {
                if self.presenter.set_camera_handle(Some(handle)) {
                    log::info!("Camera preview bound (session {})", handle.session);
                }
            }
            UiMessage::CameraReady(Err(err)) => {
                log::warn!("Camera unavailable: {}", err);
                self.failures.push(err);
                self.presenter.set_camera_handle(None);
                let requests = self.presenter.set_camera_enabled(false);
                self.resolve(requests);
            }
        }
    }

    /// Applies every message already waiting in the inbox
    pub fn drain(&mut self, inbox: &mut UiInbox) -> usize {
        let mut handled = 0;
        while let Ok(message) = inbox.try_recv() {
            self.handle(message);
            handled += 1;
        }
        handled
    }

    pub fn scroll(&mut self, offset: f32) {
        let requests = self.presenter.scroll_to(offset);
        self.resolve(requests);
    }

    pub fn resize(&mut self, viewport_width: f32) {
        let requests = self.presenter.set_viewport_width(viewport_width);
        self.resolve(requests);
    }

    pub fn tap(&mut self, index: usize) -> Result<Update, PickerError> {
        self.ensure_open()?;
        match self.presenter.tap(index) {
            Tap::Selection { change, requests } => {
                self.resolve(requests);
                Ok(Update::Selection(change))
            }
            Tap::Camera(handle) => {
                let outbound = self.router.camera(handle)?;
                Ok(self.finish(outbound))
            }
            Tap::Ignored => Ok(Update::Nothing),
        }
    }

    pub fn invoke(&mut self, command: Command) -> Result<Update, PickerError> {
        let route = self
            .router
            .invoke(command, self.presenter.selection().selection())?;
        Ok(match route {
            Route::EnterDocumentMenu => {
                self.presenter.set_hidden(true);
                Update::DocumentMenu
            }
            Route::Open(picker) => Update::Open(picker),
            Route::Emit(outbound) => self.finish(outbound),
        })
    }

    /// Result of a sub-picker opened by [`invoke`](Self::invoke)
    pub fn complete(&mut self, result: SubPickerResult) -> Result<Update, PickerError> {
        let outbound = self.router.complete(result)?;
        Ok(self.finish(outbound))
    }

    pub fn cancel_sub_picker(&mut self) {
        self.router.cancel_pending();
    }

    fn ensure_open(&self) -> Result<(), PickerError> {
        if self.router.is_finished() {
            return Err(PickerError::SessionFinished);
        }
        Ok(())
    }

    fn finish(&mut self, outbound: Outbound) -> Update {
        log::info!("Picker finished with {:?}", outbound);
        let requests = self.presenter.clear_selection();
        self.resolve(requests);
        self.outbound = Some(outbound.clone());
        Update::Outbound(outbound)
    }

    fn resolve(&self, requests: Vec<ThumbnailRequest>) {
        if !requests.is_empty() {
            self.dispatcher.resolve_thumbnails(&self.assets, requests);
        }
    }
}
