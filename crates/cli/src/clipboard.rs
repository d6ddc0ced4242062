//! System clipboard sink backed by `arboard`.

use gradient_studio_core::ClipboardSink;

/// Opens the platform clipboard on each write and keeps the last failure so
/// the caller can turn it into an exit code.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    last_error: Option<String>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    fn record(&mut self, result: Result<(), arboard::Error>) -> Result<(), String> {
        let result = result.map_err(|e| e.to_string());
        self.last_error = result.as_ref().err().cloned();
        result
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        let result = set_text(text);
        self.record(result)
    }
}

/// X11 and Wayland serve the selection from the owning process, so on Linux
/// this blocks until another client (usually a clipboard manager) takes over.
#[cfg(target_os = "linux")]
fn set_text(text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    arboard::Clipboard::new()?.set().wait().text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_text(text: &str) -> Result<(), arboard::Error> {
    arboard::Clipboard::new()?.set_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_write_is_kept_until_taken() {
        let mut clipboard = SystemClipboard::new();
        assert!(clipboard.take_error().is_none());

        let result = clipboard.record(Err(arboard::Error::ClipboardNotSupported));
        assert!(result.is_err());
        assert!(clipboard.take_error().is_some());
        assert!(clipboard.take_error().is_none());
    }

    #[test]
    fn successful_write_clears_previous_error() {
        let mut clipboard = SystemClipboard::new();
        let _ = clipboard.record(Err(arboard::Error::ContentNotAvailable));
        clipboard.record(Ok(())).unwrap();
        assert!(clipboard.take_error().is_none());
    }
}
