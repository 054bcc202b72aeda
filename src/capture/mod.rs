//! Camera acquisition and photo capture.
//!
//! This module provides abstractions for grabbing one still frame from
//! a camera and encoding it as a compressed payload for submission to
//! the recognition backend.

mod camera;
mod config;
#[cfg(feature = "camera")]
mod device;
mod frame;
mod service;

pub use camera::{Camera, CameraError, MockCamera};
pub use config::{BackendConfig, CaptureConfig, ConfigError, FileConfig};
#[cfg(feature = "camera")]
pub use device::DeviceCamera;
pub use frame::{CapturedImage, EncodeError, Frame};
pub use service::{CaptureError, CaptureService};
