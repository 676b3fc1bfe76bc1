// User-facing notices and confirmations.

pub const NO_PROXY_NOTICE: &str = "No Proxy Set";
pub const PROXY_PROBLEM_NOTICE: &str = "Problem with proxy settings. Check host and port.";
pub const CLEAR_HISTORY_TITLE: &str = "Confirm history delete.";
pub const CLEAR_HISTORY_TEXT: &str = "Do you want to clear your history?";

/// Blocking dialogs shown to the user.
pub trait Notifier {
    /// Shows `message` and returns once the user has dismissed it.
    fn notify(&mut self, message: &str);

    /// Asks the user to confirm a destructive action. `true` means proceed.
    fn confirm(&mut self, title: &str, text: &str) -> bool;
}
