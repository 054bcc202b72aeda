//! One-shot photo capture.
//!
//! The service owns the capture sequence: acquire the device, wait the
//! fixed dwell, grab exactly one frame, release the device, encode.
//! The camera is always released before the caller sees a result, so
//! the hardware indicator turns off promptly.

use super::{Camera, CameraError, CaptureConfig, CapturedImage, EncodeError};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while producing a photo.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Produces one compressed photo per invocation from a camera.
#[derive(Debug, Clone)]
pub struct CaptureService {
    config: CaptureConfig,
}

impl CaptureService {
    /// Creates a capture service with the given configuration.
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Returns the capture configuration.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Captures a single photo.
    ///
    /// Opens the camera, awaits the configured dwell so exposure and
    /// focus can settle, grabs one frame, and closes the camera before
    /// the encoded payload is returned. The camera is also closed when
    /// the frame grab fails. Never retries internally.
    pub async fn capture_photo<C: Camera>(
        &self,
        camera: &mut C,
    ) -> Result<CapturedImage, CaptureError> {
        camera.open(&self.config)?;

        if self.config.dwell_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.dwell_ms)).await;
        }

        let frame = match camera.capture() {
            Ok(frame) => frame,
            Err(e) => {
                camera.close();
                return Err(e.into());
            }
        };
        camera.close();

        let image = frame.to_jpeg(self.config.jpeg_quality)?;

        tracing::debug!(
            width = frame.width(),
            height = frame.height(),
            bytes = image.len(),
            "Captured photo"
        );

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockCamera;

    fn immediate_service() -> CaptureService {
        CaptureService::new(CaptureConfig::immediate())
    }

    #[tokio::test]
    async fn test_capture_yields_one_image_and_releases_camera() {
        let service = immediate_service();
        let mut camera = MockCamera::new();

        let image = service.capture_photo(&mut camera).await.expect("capture");

        assert!(!image.is_empty());
        assert!(!camera.is_open(), "camera must be released before return");
    }

    #[tokio::test]
    async fn test_access_denied_propagates() {
        let service = immediate_service();
        let mut camera = MockCamera::denying_access();

        let result = service.capture_photo(&mut camera).await;

        assert!(matches!(
            result,
            Err(CaptureError::Camera(CameraError::AccessDenied(_)))
        ));
        assert!(!camera.is_open());
    }

    #[tokio::test]
    async fn test_each_invocation_is_a_fresh_capture() {
        let service = immediate_service();
        let mut camera = MockCamera::new();

        let first = service.capture_photo(&mut camera).await.expect("first");
        let second = service.capture_photo(&mut camera).await.expect("second");

        assert!(!first.is_empty());
        assert!(!second.is_empty());
        assert!(!camera.is_open());
    }
}
