//! Unlock (authentication) flow.
//!
//! `Idle -> Capturing -> Submitting -> {Success, Fail, Error}`. A
//! denied match routes to the fail page; a transport error keeps the
//! capturing view with an inline message. The two are deliberately
//! asymmetric.

use super::{BACKEND_ERROR_NOTICE, CAMERA_UNAVAILABLE_NOTICE, PROCESSING_NOTICE};
use crate::backend::{RecognitionBackend, UnlockOutcome};
use crate::capture::{Camera, CaptureService};
use crate::view::{PageId, ViewRouter};

/// Phase of the unlock flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnlockPhase {
    /// Waiting for the user to press the trigger.
    #[default]
    Idle,
    /// Camera capture in progress.
    Capturing,
    /// Unlock request in flight.
    Submitting,
    /// Backend matched an identity; terminal for the session.
    Success {
        /// Matched identity name, as returned by the backend.
        user: String,
    },
    /// Backend reported no match; terminal for the session.
    Fail,
    /// Capture or transport failed; the user may retry.
    Error,
}

/// Controller for the unlock flow.
#[derive(Debug, Default)]
pub struct UnlockFlow {
    phase: UnlockPhase,
}

impl UnlockFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> &UnlockPhase {
        &self.phase
    }

    /// Whether the unlock trigger accepts a new run.
    ///
    /// Disabled while a capture or submission is in flight, which
    /// serializes access to the camera device.
    pub fn trigger_enabled(&self) -> bool {
        !matches!(
            self.phase(),
            UnlockPhase::Capturing | UnlockPhase::Submitting
        )
    }

    fn set_phase(&mut self, phase: UnlockPhase) {
        self.phase = phase;
    }

    /// Runs one capture-and-submit attempt.
    ///
    /// A camera failure leaves an inline notice and returns the flow to
    /// idle so the trigger can be pressed again; no silent stall.
    pub async fn run<C, B>(
        &mut self,
        router: &mut ViewRouter,
        service: &CaptureService,
        camera: &mut C,
        backend: &B,
    ) where
        C: Camera,
        B: RecognitionBackend + ?Sized,
    {
        if !self.trigger_enabled() {
            tracing::debug!("unlock trigger pressed while a run is in flight");
            return;
        }

        self.set_phase(UnlockPhase::Capturing);
        router.show_page(PageId::UnlockCapturing);
        router.clear_notice(PageId::UnlockCapturing);

        let image = match service.capture_photo(camera).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "unlock capture failed");
                router.set_notice(PageId::UnlockCapturing, CAMERA_UNAVAILABLE_NOTICE);
                self.set_phase(UnlockPhase::Idle);
                return;
            }
        };

        self.set_phase(UnlockPhase::Submitting);
        router.set_notice(PageId::UnlockCapturing, PROCESSING_NOTICE);

        match backend.unlock(image).await {
            Ok(UnlockOutcome::Granted { user }) => {
                tracing::info!(user = %user, "unlock granted");
                router.set_notice(PageId::Success, format!("Welcome, {user}!"));
                router.show_page(PageId::Success);
                self.set_phase(UnlockPhase::Success { user });
            }
            Ok(UnlockOutcome::Denied) => {
                tracing::info!("unlock denied");
                router.show_page(PageId::Fail);
                self.set_phase(UnlockPhase::Fail);
            }
            Err(e) => {
                // Stays on the capturing view, unlike a denial.
                tracing::warn!(error = %e, "unlock request failed");
                router.set_notice(PageId::UnlockCapturing, BACKEND_ERROR_NOTICE);
                self.set_phase(UnlockPhase::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::capture::{CaptureConfig, MockCamera};

    fn fixture() -> (ViewRouter, CaptureService, MockCamera, MockBackend) {
        (
            ViewRouter::with_default_pages(),
            CaptureService::new(CaptureConfig::immediate()),
            MockCamera::new(),
            MockBackend::new(),
        )
    }

    #[tokio::test]
    async fn test_granted_unlock_shows_success_with_name() {
        let (mut router, service, mut camera, backend) = fixture();
        backend.script_unlock(UnlockOutcome::Granted {
            user: "Alice".to_string(),
        });

        let mut flow = UnlockFlow::new();
        flow.run(&mut router, &service, &mut camera, &backend).await;

        assert!(router.is_active(PageId::Success));
        assert_eq!(router.notice(PageId::Success), Some("Welcome, Alice!"));
        assert_eq!(
            flow.phase(),
            &UnlockPhase::Success {
                user: "Alice".to_string()
            }
        );
        assert_eq!(backend.unlock_calls(), 1);
    }

    #[tokio::test]
    async fn test_denied_unlock_shows_fail_without_success_text() {
        let (mut router, service, mut camera, backend) = fixture();
        backend.script_unlock(UnlockOutcome::Denied);

        let mut flow = UnlockFlow::new();
        flow.run(&mut router, &service, &mut camera, &backend).await;

        assert!(router.is_active(PageId::Fail));
        assert_eq!(router.notice(PageId::Success), None);
        assert_eq!(flow.phase(), &UnlockPhase::Fail);
    }

    #[tokio::test]
    async fn test_transport_error_stays_on_capturing_view() {
        let (mut router, service, mut camera, backend) = fixture();
        backend.script_unlock_failure("connection refused");

        let mut flow = UnlockFlow::new();
        flow.run(&mut router, &service, &mut camera, &backend).await;

        assert!(router.is_active(PageId::UnlockCapturing));
        assert_eq!(
            router.notice(PageId::UnlockCapturing),
            Some(BACKEND_ERROR_NOTICE)
        );
        assert_eq!(flow.phase(), &UnlockPhase::Error);
        // Error re-enables the trigger; no automatic retry happened.
        assert!(flow.trigger_enabled());
        assert_eq!(backend.unlock_calls(), 1);
    }

    #[tokio::test]
    async fn test_camera_denial_reports_inline_and_returns_to_idle() {
        let (mut router, service, _, backend) = fixture();
        let mut camera = MockCamera::denying_access();

        let mut flow = UnlockFlow::new();
        flow.run(&mut router, &service, &mut camera, &backend).await;

        assert!(router.is_active(PageId::UnlockCapturing));
        assert_eq!(
            router.notice(PageId::UnlockCapturing),
            Some(CAMERA_UNAVAILABLE_NOTICE)
        );
        assert_eq!(flow.phase(), &UnlockPhase::Idle);
        assert!(flow.trigger_enabled());
        assert_eq!(backend.unlock_calls(), 0, "no submission without an image");
    }

    #[tokio::test]
    async fn test_camera_released_after_run() {
        let (mut router, service, mut camera, backend) = fixture();
        backend.script_unlock(UnlockOutcome::Denied);

        let mut flow = UnlockFlow::new();
        flow.run(&mut router, &service, &mut camera, &backend).await;

        assert!(!camera.is_open());
    }

    #[test]
    fn test_trigger_disabled_while_in_flight() {
        let mut flow = UnlockFlow::new();
        assert!(flow.trigger_enabled());

        flow.set_phase(UnlockPhase::Capturing);
        assert!(!flow.trigger_enabled());

        flow.set_phase(UnlockPhase::Submitting);
        assert!(!flow.trigger_enabled());

        flow.set_phase(UnlockPhase::Fail);
        assert!(flow.trigger_enabled());
    }
}
