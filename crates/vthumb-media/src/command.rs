//! FFmpeg command builder and runner.
//!
//! Commands here run fully piped: the video payload is fed through stdin
//! (no temp files to race on or clean up) and the encoded frame is captured
//! from stdout, with stderr kept separate for diagnostics.

use std::process::Stdio;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Builder for piped FFmpeg commands.
#[derive(Debug, Clone, Default)]
pub struct FfmpegCommand {
    /// Input arguments (before -i)
    input_args: Vec<String>,
    /// Output arguments (after -i)
    output_args: Vec<String>,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command reading from stdin and writing to stdout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input argument (before -i).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add an output argument (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Seek to a position before decoding starts.
    pub fn seek(self, timestamp: impl Into<String>) -> Self {
        self.input_arg("-ss").input_arg(timestamp)
    }

    /// Hint the demuxer at the container format of the piped input.
    pub fn input_format(self, format: impl Into<String>) -> Self {
        self.input_arg("-f").input_arg(format)
    }

    /// Emit exactly one frame.
    pub fn single_frame(self) -> Self {
        self.output_arg("-vframes").output_arg("1")
    }

    /// Set the output frame size (`WIDTHxHEIGHT`).
    pub fn size(self, resolution: impl Into<String>) -> Self {
        self.output_arg("-s").output_arg(resolution)
    }

    /// Encode the output as a single JPEG image on stdout.
    pub fn jpeg_to_stdout(self) -> Self {
        self.output_arg("-f")
            .output_arg("image2pipe")
            .output_arg("-vcodec")
            .output_arg("mjpeg")
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-v".to_string(), "error".to_string()];

        // Input args, then the piped input
        args.extend(self.input_args.clone());
        args.push("-i".to_string());
        args.push("pipe:0".to_string());

        // Output args, then the piped output
        args.extend(self.output_args.clone());
        args.push("pipe:1".to_string());

        args
    }
}

/// Runner for FFmpeg commands with a bounded execution deadline.
#[derive(Debug, Clone, Default)]
pub struct FfmpegRunner {
    /// Timeout in seconds; the process is killed on expiry
    timeout_secs: Option<u64>,
}

impl FfmpegRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Run an FFmpeg command, feeding `input` through stdin and returning the
    /// bytes the process wrote to stdout.
    ///
    /// Fails when the process exits non-zero, produces no output, or
    /// outlives the configured deadline. A zero exit with empty stdout (a
    /// seek past the end of the stream, for one) is a hard failure, never an
    /// empty result.
    pub async fn run(&self, cmd: &FfmpegCommand, input: Vec<u8>) -> MediaResult<Vec<u8>> {
        // Check FFmpeg exists
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child.stdin.take().expect("stdin not captured");
        let mut stdout = child.stdout.take().expect("stdout not captured");
        let mut stderr = child.stderr.take().expect("stderr not captured");

        // FFmpeg may stop reading as soon as it has the frame it needs, so a
        // broken pipe while feeding input is expected, not a failure.
        let writer = tokio::spawn(async move {
            let _ = stdin.write_all(&input).await;
            let _ = stdin.shutdown().await;
        });

        let stdout_reader = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf).await;
            buf
        });

        let stderr_reader = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            buf
        });

        let status = self.wait_for_completion(&mut child).await;

        let _ = writer.await;
        let output = stdout_reader.await.unwrap_or_default();
        let diagnostics = stderr_reader.await.unwrap_or_default();
        let diagnostics = if diagnostics.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&diagnostics).into_owned())
        };

        let status = status?;

        if !status.success() {
            return Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                diagnostics,
                status.code(),
            ));
        }

        if output.is_empty() {
            return Err(MediaError::EmptyOutput {
                stderr: diagnostics,
            });
        }

        Ok(output)
    }

    /// Wait for the child process, killing it when the deadline expires.
    async fn wait_for_completion(&self, child: &mut Child) -> MediaResult<std::process::ExitStatus> {
        if let Some(timeout_secs) = self.timeout_secs {
            let timeout =
                tokio::time::timeout(std::time::Duration::from_secs(timeout_secs), child.wait());
            match timeout.await {
                Ok(result) => Ok(result?),
                Err(_) => {
                    warn!(
                        "FFmpeg timed out after {} seconds, killing process",
                        timeout_secs
                    );
                    let _ = child.kill().await;
                    Err(MediaError::Timeout(timeout_secs))
                }
            }
        } else {
            Ok(child.wait().await?)
        }
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<std::path::PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = FfmpegCommand::new()
            .seek("00:00:01")
            .input_format("mp4")
            .single_frame()
            .size("320x240")
            .jpeg_to_stdout();

        let args = cmd.build_args();
        let joined = args.join(" ");
        assert_eq!(
            joined,
            "-v error -ss 00:00:01 -f mp4 -i pipe:0 \
             -vframes 1 -s 320x240 -f image2pipe -vcodec mjpeg pipe:1"
        );
    }

    #[test]
    fn test_seek_precedes_input() {
        let cmd = FfmpegCommand::new().seek("00:01:00").input_format("mkv");
        let args = cmd.build_args();

        let seek_pos = args.iter().position(|a| a == "-ss").unwrap();
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert!(seek_pos < input_pos);
        assert_eq!(args.last().map(String::as_str), Some("pipe:1"));
    }
}
