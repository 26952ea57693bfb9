//! Stand-in for the platform capture session.
//!
//! The session is created once per camera and outlives every preview handle
//! minted from it; the picker only ever rebinds handles.

use media_grid::{CameraHandle, CameraSource, PickerError};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    /// Whether a capture device exists at all
    pub available: bool,
    /// Whether the user granted camera access
    pub granted: bool,
    session: Uuid,
}

impl SimulatedCamera {
    pub fn new(available: bool, granted: bool) -> Self {
        Self {
            available,
            granted,
            session: Uuid::new_v4(),
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> Uuid {
        self.session
    }
}

impl CameraSource for SimulatedCamera {
    fn request_access(&self) -> bool {
        log::debug!("Camera access requested, granted: {}", self.granted);
        self.granted
    }

    fn create_preview_handle(&self) -> Result<CameraHandle, PickerError> {
        if !self.available {
            return Err(PickerError::DeviceUnsupported);
        }
        Ok(CameraHandle::new(self.session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_share_session() {
        let camera = SimulatedCamera::new(true, true);
        let a = camera.create_preview_handle().unwrap();
        let b = camera.create_preview_handle().unwrap();
        assert_eq!(a.session, b.session);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_handles_use_camera_session() {
        let camera = SimulatedCamera::new(true, true);
        let handle = camera.create_preview_handle().unwrap();
        assert_eq!(handle.session, camera.session());
        assert_ne!(SimulatedCamera::new(true, true).session(), camera.session());
    }

    #[test]
    fn test_missing_device() {
        let camera = SimulatedCamera::new(false, true);
        assert_eq!(
            camera.create_preview_handle(),
            Err(PickerError::DeviceUnsupported)
        );
    }

    #[test]
    fn test_denied_permission() {
        let camera = SimulatedCamera::new(true, false);
        assert!(!camera.request_access());
    }
}
