//! Page routing and per-page notice state.
//!
//! The client is a set of logical pages of which exactly one is active
//! at a time. Holding this state in an explicit struct (rather than
//! ambient globals) lets each flow be driven and asserted in isolation.

/// Identifier of a logical page region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    /// Unlock landing page with the trigger control.
    Unlock,
    /// Unlock page while a capture or submission is in flight.
    UnlockCapturing,
    /// Terminal page after a granted unlock.
    Success,
    /// Terminal page after a denied unlock.
    Fail,
    /// Enrollment form page.
    Enroll,
}

impl PageId {
    /// All defined page identifiers.
    pub const ALL: [PageId; 5] = [
        PageId::Unlock,
        PageId::UnlockCapturing,
        PageId::Success,
        PageId::Fail,
        PageId::Enroll,
    ];

    /// Stable page name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            PageId::Unlock => "unlock",
            PageId::UnlockCapturing => "unlock-capturing",
            PageId::Success => "success",
            PageId::Fail => "fail",
            PageId::Enroll => "enroll",
        }
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One registered page region.
#[derive(Debug)]
struct PageRegion {
    id: PageId,
    active: bool,
    notice: Option<String>,
}

/// Tracks which page is visible and each page's inline notice text.
#[derive(Debug, Default)]
pub struct ViewRouter {
    pages: Vec<PageRegion>,
}

impl ViewRouter {
    /// Creates a router with no registered pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router with every defined page registered and the
    /// unlock page active.
    pub fn with_default_pages() -> Self {
        let mut router = Self::new();
        for id in PageId::ALL {
            router.register(id);
        }
        router.show_page(PageId::Unlock);
        router
    }

    /// Registers a page region. Registering twice is a no-op.
    pub fn register(&mut self, id: PageId) {
        if self.region(id).is_none() {
            self.pages.push(PageRegion {
                id,
                active: false,
                notice: None,
            });
        }
    }

    /// Deactivates all pages and activates `id`.
    ///
    /// Returns `false` without changing state when `id` has not been
    /// registered. Idempotent for the already-active page.
    pub fn show_page(&mut self, id: PageId) -> bool {
        if self.region(id).is_none() {
            tracing::warn!(page = %id, "show_page on unregistered page");
            return false;
        }
        for page in &mut self.pages {
            page.active = page.id == id;
        }
        tracing::debug!(page = %id, "Page shown");
        true
    }

    /// Returns the active page, if any page has been shown yet.
    pub fn active(&self) -> Option<PageId> {
        self.pages.iter().find(|p| p.active).map(|p| p.id)
    }

    /// Returns true when `id` is the active page.
    pub fn is_active(&self, id: PageId) -> bool {
        self.region(id).map(|p| p.active).unwrap_or(false)
    }

    /// Sets the inline notice text for a page.
    pub fn set_notice(&mut self, id: PageId, text: impl Into<String>) {
        match self.region_mut(id) {
            Some(page) => page.notice = Some(text.into()),
            None => tracing::warn!(page = %id, "set_notice on unregistered page"),
        }
    }

    /// Clears the inline notice of a page.
    pub fn clear_notice(&mut self, id: PageId) {
        if let Some(page) = self.region_mut(id) {
            page.notice = None;
        }
    }

    /// Returns the inline notice of a page, if set.
    pub fn notice(&self, id: PageId) -> Option<&str> {
        self.region(id).and_then(|p| p.notice.as_deref())
    }

    fn region(&self, id: PageId) -> Option<&PageRegion> {
        self.pages.iter().find(|p| p.id == id)
    }

    fn region_mut(&mut self, id: PageId) -> Option<&mut PageRegion> {
        self.pages.iter_mut().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn active_count(router: &ViewRouter) -> usize {
        PageId::ALL
            .iter()
            .filter(|id| router.is_active(**id))
            .count()
    }

    #[test]
    fn test_show_page_activates_exactly_one() {
        let mut router = ViewRouter::with_default_pages();

        for id in PageId::ALL {
            assert!(router.show_page(id));
            assert!(router.is_active(id));
            assert_eq!(active_count(&router), 1);
        }
    }

    #[test]
    fn test_show_page_idempotent() {
        let mut router = ViewRouter::with_default_pages();
        router.show_page(PageId::Enroll);
        router.show_page(PageId::Enroll);

        assert_eq!(router.active(), Some(PageId::Enroll));
        assert_eq!(active_count(&router), 1);
    }

    #[test]
    fn test_unregistered_page_is_noop() {
        let mut router = ViewRouter::new();
        router.register(PageId::Unlock);
        router.show_page(PageId::Unlock);

        assert!(!router.show_page(PageId::Enroll));
        assert_eq!(router.active(), Some(PageId::Unlock));
    }

    #[test]
    fn test_notices_are_per_page() {
        let mut router = ViewRouter::with_default_pages();
        router.set_notice(PageId::Enroll, "Processing...");

        assert_eq!(router.notice(PageId::Enroll), Some("Processing..."));
        assert_eq!(router.notice(PageId::Unlock), None);

        router.clear_notice(PageId::Enroll);
        assert_eq!(router.notice(PageId::Enroll), None);
    }

    #[test]
    fn test_notice_survives_page_switch() {
        let mut router = ViewRouter::with_default_pages();
        router.set_notice(PageId::Success, "Welcome, Alice!");
        router.show_page(PageId::Success);

        assert_eq!(router.notice(PageId::Success), Some("Welcome, Alice!"));
    }

    proptest! {
        #[test]
        fn prop_exactly_one_active_after_any_sequence(
            sequence in proptest::collection::vec(0usize..PageId::ALL.len(), 1..40)
        ) {
            let mut router = ViewRouter::with_default_pages();
            for index in sequence {
                router.show_page(PageId::ALL[index]);
                prop_assert_eq!(active_count(&router), 1);
            }
        }
    }
}
