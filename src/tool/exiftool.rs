//! ExifTool subprocess backend
//!
//! Runs the real ExifTool executable and captures its binary standard
//! output. ExifTool's `-k` distribution enters an interactive "press enter
//! to continue" mode by default, so every invocation writes a single
//! newline to the child's stdin and closes it before draining stdout.
//!
//! The exit status of the child is deliberately not turned into an error:
//! ExifTool signals "nothing extracted" by producing no output, and some
//! builds exit nonzero even after emitting a complete image. Absence of
//! output is the observable failure signal.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use log::{debug, trace, warn};

use crate::core::error::{ExtractError, Result};
use crate::tool::locator::{ResolvedTool, ToolLocator};
use crate::tool::traits::{ExtractionMode, PreviewTool};

/// Stdout is drained in chunks of this size until end of stream
const READ_CHUNK_SIZE: usize = 4096;

/// The real ExifTool subprocess backend
#[derive(Debug, Clone)]
pub struct ExifTool {
    executable: PathBuf,
}

impl ExifTool {
    /// Create a backend for a known executable path
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    /// Create a backend by running tool discovery
    pub fn discover(locator: &ToolLocator) -> Result<Self> {
        let ResolvedTool { path, stage } = locator.resolve()?;
        debug!(
            "using ExifTool from {}: {}",
            stage.display_name(),
            path.display()
        );
        Ok(Self::new(path))
    }

    /// Path of the executable this backend runs
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Write the priming newline, close stdin, and drain stdout to EOF
    fn prime_and_drain(child: &mut Child) -> Result<Vec<u8>> {
        // Dismiss the -k interactive prompt. This must happen for every
        // invocation regardless of mode; the tool reads the byte before it
        // produces any output.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(b"\n")?;
            stdin.flush()?;
            // stdin drops here, closing the pipe
        }

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExtractError::IoError("child stdout was not captured".to_string()))?;

        let mut output = Vec::new();
        let mut buffer = [0u8; READ_CHUNK_SIZE];
        loop {
            let bytes_read = stdout.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            output.extend_from_slice(&buffer[..bytes_read]);
        }

        Ok(output)
    }
}

impl PreviewTool for ExifTool {
    fn extract(&self, path: &Path, mode: ExtractionMode) -> Result<Vec<u8>> {
        let args = mode.args(path);
        trace!(
            "invoking {} with {} arguments for {} extraction",
            self.executable.display(),
            args.len(),
            mode
        );

        let mut command = Command::new(&self.executable);
        command
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        // Keep the console window hidden when running under a GUI host.
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = command
            .spawn()
            .map_err(|e| ExtractError::ProcessLaunchFailed {
                tool: self.executable.clone(),
                source: e,
            })?;

        match Self::prime_and_drain(&mut child) {
            Ok(output) => {
                // Reap the child; its exit code is informational only.
                match child.wait() {
                    Ok(status) if !status.success() => debug!(
                        "exiftool exited with {} after producing {} bytes",
                        status,
                        output.len()
                    ),
                    Ok(_) => {}
                    Err(e) => warn!("failed to reap exiftool process: {}", e),
                }
                debug!(
                    "{} extraction for {} produced {} bytes",
                    mode,
                    path.display(),
                    output.len()
                );
                Ok(output)
            }
            Err(e) => {
                // Make sure the child and its pipes are fully released
                // before surfacing the stream error.
                let _ = child.kill();
                let _ = child.wait();
                Err(e)
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script that stands in for ExifTool
    fn fake_tool(dir: &Path, script: &str) -> PathBuf {
        let path = dir.join("exiftool");
        fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_output_is_captured_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ExifTool::new(fake_tool(dir.path(), "printf 'IMAGEDATA'"));
        let bytes = tool
            .extract(Path::new("file.indt"), ExtractionMode::ThumbnailImage)
            .unwrap();
        assert_eq!(bytes, b"IMAGEDATA");
    }

    #[test]
    fn test_binary_output_survives_the_drain() {
        let dir = tempfile::tempdir().unwrap();
        // Bytes that would break any text-mode handling: NUL, high bit, CR/LF.
        let tool = ExifTool::new(fake_tool(
            dir.path(),
            r"printf '\377\330\000\015\012\377\331'",
        ));
        let bytes = tool
            .extract(Path::new("file.indd"), ExtractionMode::PageImage)
            .unwrap();
        assert_eq!(bytes, &[0xFF, 0xD8, 0x00, 0x0D, 0x0A, 0xFF, 0xD9]);
    }

    #[test]
    fn test_priming_byte_reaches_stdin() {
        let dir = tempfile::tempdir().unwrap();
        // The script blocks until its stdin is closed; the byte count proves
        // exactly one priming byte arrived.
        let tool = ExifTool::new(fake_tool(
            dir.path(),
            "n=$(wc -c | tr -d ' '); printf 'STDIN:%s' \"$n\"",
        ));
        let bytes = tool
            .extract(Path::new("file.indd"), ExtractionMode::PageImage)
            .unwrap();
        assert_eq!(bytes, b"STDIN:1");
    }

    #[test]
    fn test_empty_output_is_ok_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ExifTool::new(fake_tool(dir.path(), "exit 0"));
        let bytes = tool
            .extract(Path::new("file.indt"), ExtractionMode::ThumbnailImage)
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_nonzero_exit_does_not_discard_output() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ExifTool::new(fake_tool(dir.path(), "printf 'PARTIAL'; exit 9"));
        let bytes = tool
            .extract(Path::new("file.indd"), ExtractionMode::PageImage)
            .unwrap();
        assert_eq!(bytes, b"PARTIAL");
    }

    #[test]
    fn test_missing_executable_is_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ExifTool::new(dir.path().join("does-not-exist"));
        let err = tool
            .extract(Path::new("file.indd"), ExtractionMode::PageImage)
            .unwrap_err();
        assert!(matches!(err, ExtractError::ProcessLaunchFailed { .. }));
    }

    #[test]
    fn test_large_output_crosses_chunk_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        // 100_000 bytes forces many 4096-byte reads.
        let tool = ExifTool::new(fake_tool(
            dir.path(),
            "i=0; while [ $i -lt 1000 ]; do printf '0123456789012345678901234567890123456789012345678901234567890123456789012345678901234567890123456789'; i=$((i+1)); done",
        ));
        let bytes = tool
            .extract(Path::new("file.indd"), ExtractionMode::PageImage)
            .unwrap();
        assert_eq!(bytes.len(), 100_000);
        assert!(bytes.iter().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_repeated_extraction_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ExifTool::new(fake_tool(dir.path(), "printf 'STABLE-OUTPUT'"));
        let first = tool
            .extract(Path::new("file.indd"), ExtractionMode::PageImage)
            .unwrap();
        let second = tool
            .extract(Path::new("file.indd"), ExtractionMode::PageImage)
            .unwrap();
        assert_eq!(first, second);
    }
}
