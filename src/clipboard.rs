//! Clipboard access for the share action.

use std::time::Duration;
use tracing::warn;

/// How long the clipboard owner stays alive after a write so clipboard
/// managers can take the text over.
const HOLD: Duration = Duration::from_millis(100);

/// Copy text to clipboard using arboard crate
///
/// Returns `false` when no clipboard is available; callers fall back to
/// showing the text.
pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
            Ok(()) => {
                std::thread::sleep(HOLD);
                true
            }
            Err(e) => {
                warn!("Failed to copy to clipboard: {}", e);
                false
            }
        },
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            false
        }
    }
}
