//! Unlock and enrollment flow controllers.
//!
//! Each flow owns its phase and drives the [`ViewRouter`](crate::view::ViewRouter)
//! through its transitions. Flows never retry automatically; the user
//! restarts them via the navigation affordances.

mod enroll;
mod unlock;

pub use enroll::{
    EnrollFlow, EnrollPhase, EnrollmentDraft, ImageSource, UNKNOWN_ERROR_NOTICE, VALIDATION_NOTICE,
};
pub use unlock::{UnlockFlow, UnlockPhase};

/// Inline notice while a request is in flight.
pub const PROCESSING_NOTICE: &str = "Processing...";

/// Inline notice for any transport failure talking to the backend.
pub const BACKEND_ERROR_NOTICE: &str = "Error communicating with backend.";

/// Inline notice when the camera cannot be acquired or fails mid-capture.
pub const CAMERA_UNAVAILABLE_NOTICE: &str = "Camera unavailable.";
