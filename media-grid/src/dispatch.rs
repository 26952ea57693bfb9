//! Background execution for the picker.
//!
//! Blocking collaborator calls run on the runtime's blocking pool. Their
//! results come back as `UiMessage`s over a single-consumer channel that the
//! UI loop drains; nothing here touches picker state.

use crate::error::{Permission, PickerError};
use crate::models::{CameraHandle, PhotoAsset};
use crate::presenter::{ThumbnailRequest, ThumbnailResult};
use crate::source::{AssetSource, CameraSource};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Result of background work, applied on the UI thread
#[derive(Debug)]
pub enum UiMessage {
    AssetsFetched(Result<Vec<PhotoAsset>, PickerError>),
    CameraReady(Result<CameraHandle, PickerError>),
    ThumbnailResolved(ThumbnailResult),
}

pub type UiInbox = mpsc::UnboundedReceiver<UiMessage>;

#[derive(Debug, Clone)]
pub struct Dispatcher {
    runtime: Handle,
    tx: mpsc::UnboundedSender<UiMessage>,
}

impl Dispatcher {
    pub fn new(runtime: Handle) -> (Self, UiInbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { runtime, tx }, rx)
    }

    fn submit<F>(&self, job: F)
    where
        F: FnOnce() -> UiMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn_blocking(move || {
            if tx.send(job()).is_err() {
                log::debug!("UI inbox closed, dropping background result");
            }
        });
    }

    pub fn fetch_assets(&self, source: Arc<dyn AssetSource>) {
        log::debug!("Fetching assets");
        self.submit(move || UiMessage::AssetsFetched(source.fetch()));
    }

    /// Requests camera access and, if granted, a preview handle
    pub fn start_camera(&self, camera: Arc<dyn CameraSource>) {
        log::debug!("Starting camera preview");
        self.submit(move || {
            let result = if camera.request_access() {
                camera.create_preview_handle()
            } else {
                Err(PickerError::PermissionDenied(Permission::Camera))
            };
            UiMessage::CameraReady(result)
        });
    }

    /// One job per request; results arrive in no particular order
    pub fn resolve_thumbnails(
        &self,
        source: &Arc<dyn AssetSource>,
        requests: Vec<ThumbnailRequest>,
    ) {
        for request in requests {
            let source = Arc::clone(source);
            self.submit(move || {
                let image = source.resolve_thumbnail(&request.asset, request.size);
                UiMessage::ThumbnailResolved(ThumbnailResult {
                    slot: request.slot,
                    asset: request.asset.id,
                    image,
                })
            });
        }
    }
}
