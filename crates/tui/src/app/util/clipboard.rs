use arboard::Clipboard;
use std::env;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardCopyError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("clip.exe failed: {0}")]
    WindowsBridge(String),
}

fn is_wsl_environment() -> bool {
    if env::var_os("WSL_DISTRO_NAME").is_some() || env::var_os("WSL_INTEROP").is_some() {
        return true;
    }
    fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|value| osrelease_is_wsl(&value))
        .unwrap_or(false)
}

fn osrelease_is_wsl(value: &str) -> bool {
    value.to_ascii_lowercase().contains("microsoft")
}

fn copy_with_clip_exe(text: &str) -> Result<(), ClipboardCopyError> {
    let mut child = Command::new("clip.exe")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| ClipboardCopyError::WindowsBridge(format!("failed to launch: {error}")))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|error| ClipboardCopyError::WindowsBridge(error.to_string()))?;
    }
    let output = child
        .wait_with_output()
        .map_err(|error| ClipboardCopyError::WindowsBridge(error.to_string()))?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let details = stderr.trim();
    Err(ClipboardCopyError::WindowsBridge(if details.is_empty() {
        format!("exited with status {}", output.status)
    } else {
        details.to_string()
    }))
}

/// Native clipboard first; under WSL a failure there falls back to the
/// Windows clipboard through `clip.exe`.
pub fn copy_text_to_clipboard(text: &str) -> Result<(), ClipboardCopyError> {
    let native = Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
        .map_err(|error| ClipboardCopyError::Clipboard(error.to_string()));
    match native {
        Ok(()) => Ok(()),
        Err(native_error) if is_wsl_environment() => {
            tracing::debug!(%native_error, "native clipboard failed, trying clip.exe");
            copy_with_clip_exe(text).map_err(|_| native_error)
        }
        Err(native_error) => Err(native_error),
    }
}
