//! Clipboard Access
//!
//! The dashboard copies API keys to the system clipboard. The browser build
//! goes through `navigator.clipboard`; natively we pipe into whichever
//! clipboard utility the platform ships.

use thiserror::Error;

/// Errors from a clipboard backend
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("No clipboard available: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write-only clipboard
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[cfg(feature = "native")]
pub use system::SystemClipboard;

#[cfg(feature = "native")]
mod system {
    use super::{Clipboard, ClipboardError};
    use std::io::Write;
    use std::process::{Command, Stdio};

    /// Candidate commands, tried in order
    #[cfg(target_os = "macos")]
    const COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

    #[cfg(target_os = "windows")]
    const COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const COMMANDS: &[(&str, &[&str])] = &[
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];

    /// Clipboard backed by the platform's copy utility
    #[derive(Debug, Default)]
    pub struct SystemClipboard;

    impl SystemClipboard {
        pub fn new() -> Self {
            Self
        }

        fn pipe(program: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
            let mut child = Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()?;

            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            drop(child.stdin.take());

            let status = child.wait()?;
            if status.success() {
                Ok(())
            } else {
                Err(ClipboardError::Unavailable(format!(
                    "{} exited with {}",
                    program, status
                )))
            }
        }
    }

    impl Clipboard for SystemClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            let mut last_error = ClipboardError::Unavailable("no clipboard utility found".into());

            for (program, args) in COMMANDS {
                match Self::pipe(program, args, text) {
                    Ok(()) => {
                        tracing::debug!(program, "Copied to clipboard");
                        return Ok(());
                    }
                    Err(e) => {
                        tracing::debug!(program, error = %e, "Clipboard utility failed");
                        last_error = e;
                    }
                }
            }

            Err(last_error)
        }
    }
}

/// Records everything written; used by tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingClipboard {
    pub contents: Vec<String>,
}

#[cfg(test)]
impl Clipboard for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents.push(text.to_string());
        Ok(())
    }
}
