//! Single-frame extraction.

use vthumb_models::{Resolution, Timestamp};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Decode one frame of the piped video payload at `timestamp`, scaled to
/// `resolution`, and return it as JPEG bytes.
///
/// `format_hint` names the container format of the payload (the demuxer
/// cannot always sniff it from a pipe). The process is killed after
/// `timeout_secs`.
pub async fn extract_frame(
    payload: Vec<u8>,
    format_hint: &str,
    timestamp: Timestamp,
    resolution: Resolution,
    timeout_secs: u64,
) -> MediaResult<Vec<u8>> {
    let cmd = FfmpegCommand::new()
        .seek(timestamp.to_string())
        .input_format(format_hint)
        .single_frame()
        .size(resolution.to_string())
        .jpeg_to_stdout();

    FfmpegRunner::new().with_timeout(timeout_secs).run(&cmd, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_args() {
        let cmd = FfmpegCommand::new()
            .seek(Timestamp::from_secs(61).to_string())
            .input_format("webm")
            .single_frame()
            .size(Resolution::new(320, 240).to_string())
            .jpeg_to_stdout();

        let args = cmd.build_args();
        assert!(args.windows(2).any(|w| w == ["-ss", "00:01:01"]));
        assert!(args.windows(2).any(|w| w == ["-f", "webm"]));
        assert!(args.windows(2).any(|w| w == ["-s", "320x240"]));
        assert!(args.windows(2).any(|w| w == ["-vcodec", "mjpeg"]));
    }
}
