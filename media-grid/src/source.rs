//! Collaborator contracts for the platform asset library and camera.
//!
//! Implementations are blocking; the dispatcher runs them off the UI thread.

use crate::error::PickerError;
use crate::models::{CameraHandle, PhotoAsset, Size, Thumbnail};

/// Photo library access
pub trait AssetSource: Send + Sync + 'static {
    /// Enumerates pickable assets in display order
    fn fetch(&self) -> Result<Vec<PhotoAsset>, PickerError>;

    /// Best-effort preview at roughly `size`; `None` if it cannot be produced
    fn resolve_thumbnail(&self, asset: &PhotoAsset, size: Size) -> Option<Thumbnail>;
}

/// Live camera access
pub trait CameraSource: Send + Sync + 'static {
    fn request_access(&self) -> bool;

    /// Creates a preview handle over the capture session
    fn create_preview_handle(&self) -> Result<CameraHandle, PickerError>;
}

/// Asset source that always reports the same assets and no previews
#[derive(Debug, Clone, Default)]
pub struct StaticAssetSource {
    pub assets: Vec<PhotoAsset>,
}

impl AssetSource for StaticAssetSource {
    fn fetch(&self) -> Result<Vec<PhotoAsset>, PickerError> {
        Ok(self.assets.clone())
    }

    fn resolve_thumbnail(&self, _asset: &PhotoAsset, _size: Size) -> Option<Thumbnail> {
        None
    }
}

/// Camera source for hosts without a capture device
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

impl CameraSource for NoCamera {
    fn request_access(&self) -> bool {
        false
    }

    fn create_preview_handle(&self) -> Result<CameraHandle, PickerError> {
        Err(PickerError::DeviceUnsupported)
    }
}
