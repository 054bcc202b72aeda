//! Facegate Client Library
//!
//! A kiosk client for a remote face-recognition backend. The backend
//! owns all recognition, matching, and storage; this crate drives the
//! capture-and-submit workflow around it: page state, camera capture to
//! a compressed payload, and the unlock and enrollment HTTP flows.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! view (pages, bindings)
//!     ↓ dispatch
//! flow (unlock, enroll) → backend (HTTP)
//!     ↓
//! capture (camera → dwell → frame → JPEG)
//! ```
//!
//! # Design Principles
//!
//! - **Explicit state**: page routing and flow phases live in structs
//!   passed to the flows, not in ambient globals
//! - **Trait seams**: the camera and the backend are traits with mock
//!   implementations, so every flow is testable without hardware or
//!   network
//! - **One shot per action**: each capture produces exactly one payload
//!   and releases the device before handing it over; no operation
//!   retries automatically
//!
//! # Example
//!
//! ```no_run
//! use facegate::{
//!     backend::{MockBackend, UnlockOutcome},
//!     capture::{CaptureConfig, CaptureService, MockCamera},
//!     flow::UnlockFlow,
//!     view::{PageId, ViewRouter},
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = CaptureService::new(CaptureConfig::immediate());
//!     let mut camera = MockCamera::new();
//!
//!     let backend = MockBackend::new();
//!     backend.script_unlock(UnlockOutcome::Granted {
//!         user: "Alice".to_string(),
//!     });
//!
//!     let mut router = ViewRouter::with_default_pages();
//!     let mut flow = UnlockFlow::new();
//!     flow.run(&mut router, &service, &mut camera, &backend).await;
//!
//!     assert!(router.is_active(PageId::Success));
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod backend;
pub mod capture;
pub mod flow;
pub mod view;

// Re-export commonly used types at crate root
pub use backend::{
    BackendError, EnrollOutcome, EnrollToken, HttpBackend, MockBackend, RecognitionBackend,
    UnlockOutcome,
};
pub use capture::{
    BackendConfig, Camera, CameraError, CaptureConfig, CaptureService, CapturedImage, FileConfig,
    Frame, MockCamera,
};
pub use flow::{EnrollFlow, EnrollPhase, UnlockFlow, UnlockPhase};
pub use view::{PageId, ViewRouter};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
