//! Enrollment (registration) flow.
//!
//! `Editing -> IssuingToken -> Submitting -> {Enrolled, Rejected, Error}`.
//! Submission is validated locally before any network call, and the
//! draft image is consumed exactly once, when it is attached to the
//! enroll request.

use super::{BACKEND_ERROR_NOTICE, CAMERA_UNAVAILABLE_NOTICE, PROCESSING_NOTICE};
use crate::backend::{EnrollOutcome, RecognitionBackend};
use crate::capture::{Camera, CaptureService, CapturedImage};
use crate::view::{PageId, ViewRouter};

/// Inline notice when the draft is missing a name or an image.
pub const VALIDATION_NOTICE: &str = "Please provide a name and photo.";

/// Inline notice when the backend response matched no known shape.
pub const UNKNOWN_ERROR_NOTICE: &str = "Unknown error.";

/// Where the draft image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Captured live from the camera.
    Camera,
    /// Picked from a file on disk.
    File,
}

#[derive(Debug)]
struct DraftImage {
    payload: CapturedImage,
    source: ImageSource,
}

/// The in-progress pairing of a name and an image.
///
/// Mutable until submit; never partially sent. Only one image is held
/// at a time: attaching a new one replaces the previous, whatever its
/// source.
#[derive(Debug, Default)]
pub struct EnrollmentDraft {
    name: String,
    image: Option<DraftImage>,
}

impl EnrollmentDraft {
    /// Returns the entered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true when an image is attached.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Returns the source of the attached image, if any.
    pub fn image_source(&self) -> Option<ImageSource> {
        self.image.as_ref().map(|i| i.source)
    }

    fn attach(&mut self, payload: CapturedImage, source: ImageSource) {
        if let Some(previous) = &self.image {
            tracing::debug!(
                previous = ?previous.source,
                replacement = ?source,
                "Replacing draft image"
            );
        }
        self.image = Some(DraftImage { payload, source });
    }

    fn take_image(&mut self) -> Option<CapturedImage> {
        self.image.take().map(|i| i.payload)
    }
}

/// Phase of the enrollment flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnrollPhase {
    /// Collecting a name and an image.
    #[default]
    Editing,
    /// Requesting a one-time token.
    IssuingToken,
    /// Enroll request in flight.
    Submitting,
    /// Backend confirmed the registration.
    Enrolled {
        /// Name as registered by the backend.
        name: String,
    },
    /// Backend refused the registration.
    Rejected {
        /// Backend-provided reason.
        message: String,
    },
    /// Transport failure, or an unrecognized response shape.
    Error,
}

/// Controller for the enrollment flow.
#[derive(Debug, Default)]
pub struct EnrollFlow {
    draft: EnrollmentDraft,
    phase: EnrollPhase,
}

impl EnrollFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> &EnrollPhase {
        &self.phase
    }

    /// Returns the draft being edited.
    pub fn draft(&self) -> &EnrollmentDraft {
        &self.draft
    }

    /// Sets the name to register.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Attaches an image to the draft; the last one set wins.
    pub fn attach_image(&mut self, image: CapturedImage, source: ImageSource) {
        self.draft.attach(image, source);
    }

    /// Captures an enrollment photo from the camera and attaches it.
    pub async fn capture_photo<C: Camera>(
        &mut self,
        router: &mut ViewRouter,
        service: &CaptureService,
        camera: &mut C,
    ) {
        match service.capture_photo(camera).await {
            Ok(image) => {
                self.attach_image(image, ImageSource::Camera);
                router.set_notice(PageId::Enroll, "Photo captured.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "enroll capture failed");
                router.set_notice(PageId::Enroll, CAMERA_UNAVAILABLE_NOTICE);
            }
        }
    }

    /// Validates the draft and submits it.
    ///
    /// A missing name or image blocks submission with an inline notice
    /// and performs no network call. Otherwise the flow issues a fresh
    /// one-time token and posts the draft under it. A transport failure
    /// at either step collapses to the same generic notice; the failing
    /// step is only distinguished in the log.
    pub async fn submit<B>(&mut self, router: &mut ViewRouter, backend: &B)
    where
        B: RecognitionBackend + ?Sized,
    {
        if self.draft.name().is_empty() || !self.draft.has_image() {
            tracing::debug!("enroll submission blocked by local validation");
            router.set_notice(PageId::Enroll, VALIDATION_NOTICE);
            return;
        }

        router.set_notice(PageId::Enroll, PROCESSING_NOTICE);

        self.phase = EnrollPhase::IssuingToken;
        let token = match backend.issue_enroll_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, step = "issue-token", "enroll request failed");
                self.fail(router);
                return;
            }
        };

        self.phase = EnrollPhase::Submitting;
        let Some(image) = self.draft.take_image() else {
            // Unreachable after validation; keep the fail-fast behavior.
            router.set_notice(PageId::Enroll, VALIDATION_NOTICE);
            self.phase = EnrollPhase::Editing;
            return;
        };

        match backend.enroll(&token, self.draft.name(), image).await {
            Ok(EnrollOutcome::Enrolled { name }) => {
                tracing::info!(name = %name, "enrollment confirmed");
                router.set_notice(
                    PageId::Enroll,
                    format!("Enrollment successful! Welcome, {name}."),
                );
                self.phase = EnrollPhase::Enrolled { name };
            }
            Ok(EnrollOutcome::Rejected { message }) => {
                tracing::info!(message = %message, "enrollment rejected");
                router.set_notice(PageId::Enroll, format!("Error: {message}"));
                self.phase = EnrollPhase::Rejected { message };
            }
            Ok(EnrollOutcome::Unrecognized) => {
                tracing::warn!("enrollment response not recognized");
                router.set_notice(PageId::Enroll, UNKNOWN_ERROR_NOTICE);
                self.phase = EnrollPhase::Error;
            }
            Err(e) => {
                tracing::warn!(error = %e, step = "enroll", "enroll request failed");
                self.fail(router);
            }
        }
    }

    fn fail(&mut self, router: &mut ViewRouter) {
        router.set_notice(PageId::Enroll, BACKEND_ERROR_NOTICE);
        self.phase = EnrollPhase::Error;
    }
}
