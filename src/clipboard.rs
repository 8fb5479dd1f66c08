//! Copy-to-clipboard with fallbacks and button feedback.
//!
//! The system clipboard utility is tried first, then an OSC 52 escape sequence
//! on the terminal. When both fail the text is handed back so the user can
//! copy it by hand. Backend failures are logged, never propagated.

use std::io::{IsTerminal, Write};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{ConsoleError, ConsoleResult};

#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    fn name(&self) -> &'static str;
    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Pipes the text into the first clipboard utility that accepts it.
pub struct SystemClipboard {
    candidates: Vec<(&'static str, Vec<&'static str>)>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![("pbcopy", vec![])]
        } else if cfg!(windows) {
            vec![("clip", vec![])]
        } else {
            let mut c = Vec::new();
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                c.push(("wl-copy", vec![]));
            }
            c.push(("xclip", vec!["-selection", "clipboard"]));
            c.push(("xsel", vec!["--clipboard", "--input"]));
            c
        };
        Self { candidates }
    }
}

#[async_trait]
impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut last_err = anyhow::anyhow!("no clipboard utility available");
        for (program, args) in &self.candidates {
            match pipe_into(program, args, text).await {
                Ok(()) => {
                    debug!("Copied {} bytes via {}", text.len(), program);
                    return Ok(());
                }
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

async fn pipe_into(program: &str, args: &[&str], text: &str) -> anyhow::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        stdin.shutdown().await?;
    }
    let status = child.wait().await?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", program, status);
    }
    Ok(())
}

/// Asks the terminal emulator to set the clipboard (OSC 52).
pub struct TerminalClipboard;

#[async_trait]
impl ClipboardBackend for TerminalClipboard {
    fn name(&self) -> &'static str {
        "osc52"
    }

    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            anyhow::bail!("stderr is not a terminal");
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        write!(stderr, "\x1b]52;c;{}\x07", encoded)?;
        stderr.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Nothing worked; the text has to be copied by hand.
    Manual(String),
}

pub async fn copy_with_fallback(backends: &[&dyn ClipboardBackend], text: &str) -> ConsoleResult<CopyOutcome> {
    if text.is_empty() {
        return Err(ConsoleError::InvalidInput("No text to copy".into()));
    }
    for backend in backends {
        match backend.write_text(text).await {
            Ok(()) => return Ok(CopyOutcome::Copied),
            Err(e) => warn!("Clipboard backend {} failed: {}", backend.name(), e),
        }
    }
    Ok(CopyOutcome::Manual(text.to_string()))
}

/// Copies with the default chain: system utility, then OSC 52.
pub async fn copy_text(text: &str) -> ConsoleResult<CopyOutcome> {
    let system = SystemClipboard::default();
    let terminal = TerminalClipboard;
    let backends: [&dyn ClipboardBackend; 2] = [&system, &terminal];
    copy_with_fallback(&backends, text).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Success,
    Warning,
}

/// Transient label shown on the copy button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonFeedback {
    pub label: &'static str,
    pub state: FeedbackState,
    pub hint: Option<String>,
    pub revert_after: Duration,
}

impl ButtonFeedback {
    pub fn for_outcome(outcome: &CopyOutcome) -> Self {
        match outcome {
            CopyOutcome::Copied => Self {
                label: "Copied!",
                state: FeedbackState::Success,
                hint: None,
                revert_after: Duration::from_millis(1000),
            },
            CopyOutcome::Manual(text) => Self {
                label: "Manual Copy",
                state: FeedbackState::Warning,
                hint: Some(format!("Please copy this text manually: {}", text)),
                revert_after: Duration::from_millis(2000),
            },
        }
    }
}
