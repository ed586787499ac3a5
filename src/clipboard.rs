use arboard::Clipboard;

use crate::notifications::NotificationCenter;

/// Put `text` on the system clipboard and tell the user how it went.
///
/// The platform error, if any, is logged; the user only sees the
/// success or danger notification.
pub fn copy_text(text: &str, notifications: &NotificationCenter) {
    match try_copy(text) {
        Ok(()) => {
            notifications.success("Copied to clipboard");
        }
        Err(err) => {
            tracing::error!(target: "clipboard", "clipboard write failed: {}", err);
            notifications.danger("Copy failed");
        }
    }
}

fn try_copy(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)
}
