//! Real webcam capture via `nokhwa`.
//!
//! Only compiled with the `camera` feature. The stream is opened per
//! capture and torn down in `close`, matching the exclusive-ownership
//! contract of the [`Camera`] trait.

use super::{Camera, CameraError, CaptureConfig, Frame};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};

/// Camera implementation backed by a physical capture device.
#[derive(Default)]
pub struct DeviceCamera {
    inner: Option<nokhwa::Camera>,
    sequence: u64,
}

impl DeviceCamera {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Maps a device-layer error to the trait error space, keeping
/// permission problems distinguishable from other open failures.
fn open_error(e: nokhwa::NokhwaError) -> CameraError {
    let message = e.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("denied") || lowered.contains("permission") {
        CameraError::AccessDenied(message)
    } else if lowered.contains("not found") || lowered.contains("no device") {
        CameraError::DeviceNotFound(message)
    } else {
        CameraError::OpenFailed(message)
    }
}

impl Camera for DeviceCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        config
            .validate()
            .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;

        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(config.width, config.height),
                FrameFormat::MJPEG,
                30,
            ),
        ));

        let mut camera = nokhwa::Camera::new(CameraIndex::Index(config.device_id), requested)
            .map_err(open_error)?;
        camera.open_stream().map_err(open_error)?;

        tracing::debug!(device = config.device_id, "DeviceCamera opened");
        self.inner = Some(camera);
        Ok(())
    }

    fn capture(&mut self) -> Result<Frame, CameraError> {
        let camera = self.inner.as_mut().ok_or(CameraError::NotInitialized)?;

        let buffer = camera
            .frame()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        self.sequence += 1;
        Ok(Frame::new(decoded.into_raw(), width, height, self.sequence))
    }

    fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.inner.take() {
            if let Err(e) = camera.stop_stream() {
                tracing::debug!(error = %e, "Camera stream teardown reported an error");
            }
            tracing::debug!("DeviceCamera closed");
        }
    }
}
