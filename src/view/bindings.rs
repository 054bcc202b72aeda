//! Declarative command bindings per page.
//!
//! Each page declares its {command word -> action} table as data
//! instead of wiring handlers as a rendering side effect, so the shell
//! and the tests dispatch through the same lookup.

use super::PageId;

/// An action a page binding can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Navigate to the unlock page.
    ShowUnlock,
    /// Navigate to the enrollment page.
    ShowEnroll,
    /// Start an unlock capture-and-submit run.
    StartUnlock,
    /// Set the enrollment draft name (takes the rest of the line).
    SetEnrollName,
    /// Attach an image file to the enrollment draft (takes a path).
    AttachEnrollFile,
    /// Capture an enrollment photo from the camera.
    CaptureEnrollPhoto,
    /// Submit the enrollment draft.
    SubmitEnroll,
    /// Leave the client.
    Quit,
}

/// One {command -> action} entry of a page's binding table.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    /// Command word the user types.
    pub command: &'static str,
    /// Action the command triggers.
    pub action: Action,
    /// Short usage line.
    pub help: &'static str,
}

const NAVIGATION: [Binding; 3] = [
    Binding {
        command: "unlock",
        action: Action::ShowUnlock,
        help: "unlock            go to the unlock page",
    },
    Binding {
        command: "enroll",
        action: Action::ShowEnroll,
        help: "enroll            register your face",
    },
    QUIT,
];

const QUIT: Binding = Binding {
    command: "quit",
    action: Action::Quit,
    help: "quit              leave",
};

const UNLOCK_PAGE: [Binding; 3] = [
    Binding {
        command: "unlock",
        action: Action::StartUnlock,
        help: "unlock            capture a photo and try to unlock",
    },
    Binding {
        command: "enroll",
        action: Action::ShowEnroll,
        help: "enroll            register your face",
    },
    QUIT,
];

const ENROLL_PAGE: [Binding; 6] = [
    Binding {
        command: "name",
        action: Action::SetEnrollName,
        help: "name <your name>  set the name to register",
    },
    Binding {
        command: "file",
        action: Action::AttachEnrollFile,
        help: "file <path>       attach a photo from disk",
    },
    Binding {
        command: "capture",
        action: Action::CaptureEnrollPhoto,
        help: "capture           take a photo with the camera",
    },
    Binding {
        command: "submit",
        action: Action::SubmitEnroll,
        help: "submit            send the enrollment",
    },
    Binding {
        command: "back",
        action: Action::ShowUnlock,
        help: "back              return to the unlock page",
    },
    QUIT,
];

/// Returns the binding table of a page.
pub fn bindings(page: PageId) -> &'static [Binding] {
    match page {
        PageId::Unlock | PageId::UnlockCapturing => &UNLOCK_PAGE,
        PageId::Success | PageId::Fail => &NAVIGATION,
        PageId::Enroll => &ENROLL_PAGE,
    }
}

/// Resolves a command word against a page's bindings.
pub fn resolve(page: PageId, command: &str) -> Option<Action> {
    bindings(page)
        .iter()
        .find(|b| b.command == command)
        .map(|b| b.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_page_trigger() {
        assert_eq!(
            resolve(PageId::Unlock, "unlock"),
            Some(Action::StartUnlock)
        );
        assert_eq!(resolve(PageId::Unlock, "enroll"), Some(Action::ShowEnroll));
        assert_eq!(resolve(PageId::Unlock, "bogus"), None);
    }

    #[test]
    fn test_capturing_page_allows_retry() {
        assert_eq!(
            resolve(PageId::UnlockCapturing, "unlock"),
            Some(Action::StartUnlock)
        );
    }

    #[test]
    fn test_terminal_pages_navigate_only() {
        for page in [PageId::Success, PageId::Fail] {
            assert_eq!(resolve(page, "unlock"), Some(Action::ShowUnlock));
            assert_eq!(resolve(page, "submit"), None);
        }
    }

    #[test]
    fn test_enroll_page_form_commands() {
        assert_eq!(
            resolve(PageId::Enroll, "name"),
            Some(Action::SetEnrollName)
        );
        assert_eq!(
            resolve(PageId::Enroll, "file"),
            Some(Action::AttachEnrollFile)
        );
        assert_eq!(
            resolve(PageId::Enroll, "capture"),
            Some(Action::CaptureEnrollPhoto)
        );
        assert_eq!(
            resolve(PageId::Enroll, "submit"),
            Some(Action::SubmitEnroll)
        );
    }

    #[test]
    fn test_every_page_can_quit() {
        for page in PageId::ALL {
            assert_eq!(resolve(page, "quit"), Some(Action::Quit));
        }
    }
}
