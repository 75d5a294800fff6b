//! Camera capture via a local capture tool.
//!
//! There is no portable camera API worth carrying for a CLI, so this adapter
//! shells out to whichever of `fswebcam` or `ffmpeg` is installed, writes a
//! single frame to a temp file, and reads it back as a JPEG data URI.

use async_trait::async_trait;
use leafscan_application::{CaptureError, ImageSource};
use leafscan_domain::DataUri;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

const DEFAULT_DEVICE: &str = "/dev/video0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaptureTool {
    Fswebcam,
    Ffmpeg,
}

impl CaptureTool {
    fn program(self) -> &'static str {
        match self {
            CaptureTool::Fswebcam => "fswebcam",
            CaptureTool::Ffmpeg => "ffmpeg",
        }
    }
}

/// Arguments for a single-frame capture to `output`.
pub(crate) fn capture_args(tool: CaptureTool, device: &str, output: &Path) -> Vec<String> {
    let output = output.display().to_string();
    match tool {
        CaptureTool::Fswebcam => vec![
            "-d".into(),
            device.into(),
            "-r".into(),
            "1280x720".into(),
            "--no-banner".into(),
            output,
        ],
        CaptureTool::Ffmpeg => vec![
            "-y".into(),
            "-f".into(),
            "v4l2".into(),
            "-i".into(),
            device.into(),
            "-frames:v".into(),
            "1".into(),
            output,
        ],
    }
}

pub struct CameraCapture {
    device: String,
}

impl CameraCapture {
    pub fn new(device: Option<String>) -> Self {
        Self {
            device: device.unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
        }
    }

    fn find_tool() -> Option<CaptureTool> {
        for tool in [CaptureTool::Fswebcam, CaptureTool::Ffmpeg] {
            if which::which(tool.program()).is_ok() {
                return Some(tool);
            }
        }
        None
    }
}

#[async_trait]
impl ImageSource for CameraCapture {
    async fn acquire(&self) -> Result<DataUri, CaptureError> {
        let tool = Self::find_tool().ok_or(CaptureError::NoCamera)?;

        let output = tempfile::Builder::new()
            .prefix("leafscan-capture-")
            .suffix(".jpg")
            .tempfile()?;

        let args = capture_args(tool, &self.device, output.path());
        debug!(tool = tool.program(), device = %self.device, "capturing frame");

        let result = Command::new(tool.program())
            .args(&args)
            .output()
            .await
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            warn!(tool = tool.program(), "capture tool failed");
            return Err(CaptureError::CaptureFailed(
                stderr.lines().last().unwrap_or("unknown error").to_string(),
            ));
        }

        let bytes = tokio::fs::read(output.path()).await?;
        if bytes.is_empty() {
            return Err(CaptureError::CaptureFailed(
                "no frame was captured".to_string(),
            ));
        }
        Ok(DataUri::new("image/jpeg", bytes))
    }
}
