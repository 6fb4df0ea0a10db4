//! Clipboard access for sharing invite codes

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Copy `text`, trying arboard and then `wl-copy`. Returns the method used.
pub fn copy_text(text: &str) -> Option<&'static str> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => {
            debug!("Copied to clipboard via arboard");
            return Some("arboard");
        }
        Err(e) => debug!(error = %e, "arboard clipboard unavailable"),
    }

    if wl_copy(text) {
        debug!("Copied to clipboard via wl-copy");
        return Some("wl-copy");
    }

    warn!("No clipboard available");
    None
}

fn wl_copy(text: &str) -> bool {
    let Ok(mut child) = Command::new("wl-copy")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    let written = child
        .stdin
        .take()
        .map(|mut stdin| stdin.write_all(text.as_bytes()).is_ok())
        .unwrap_or(false);

    matches!(child.wait(), Ok(status) if status.success()) && written
}
