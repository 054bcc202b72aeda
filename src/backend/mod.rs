//! Client for the remote face-recognition backend.
//!
//! All recognition, matching, and storage live behind three HTTP
//! endpoints; this module maps them to typed operations and outcomes.

mod client;
mod mock;

pub use client::{
    BackendError, EnrollOutcome, EnrollToken, HttpBackend, RecognitionBackend, UnlockOutcome,
};
pub use mock::{EnrollRecord, MockBackend};
