//! System clipboard access via arboard.

use anyhow::Result;
use arboard::Clipboard;

/// Copy text to the system clipboard
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}
