use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::process::Command;

/// Read-only view of the media a filter graph is applied to
pub trait MediaAsset {
    /// Width and height of the main video stream
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Duration in seconds
    fn duration(&self) -> Option<f64>;
}

/// Output format and media facts handed to every filter at compile time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatContext {
    pub container: Option<String>,
    pub dimensions: Option<(u32, u32)>,
    pub duration: Option<f64>,
}

impl FormatContext {
    pub fn from_media(media: &dyn MediaAsset, container: Option<String>) -> Self {
        Self {
            container,
            dimensions: media.dimensions(),
            duration: media.duration(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbedMedia {
    pub duration: Option<f64>,
    pub format_name: Option<String>,
    pub video: Option<VideoInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub index: usize,
    pub codec_name: String,
    pub width: u32,
    pub height: u32,
    pub is_default: bool,
}

impl MediaAsset for ProbedMedia {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.video.as_ref().map(|v| (v.width, v.height))
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

// Internal FFprobe JSON structures
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    streams: Option<Vec<FfprobeStream>>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    format_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: usize,
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    disposition: Option<FfprobeDisposition>,
}

#[derive(Debug, Deserialize)]
struct FfprobeDisposition {
    default: Option<i32>,
}

/// Run ffprobe on a file and collect the facts filters care about
pub async fn probe_media(ffprobe_binary: &str, path: &Path) -> Result<ProbedMedia> {
    let output = Command::new(ffprobe_binary)
        .arg("-v")
        .arg("quiet")
        .arg("-print_format")
        .arg("json")
        .arg("-show_format")
        .arg("-show_streams")
        .arg(path)
        .output()
        .await
        .with_context(|| format!("Failed to execute {}", ffprobe_binary))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("ffprobe failed: {}", stderr);
    }

    let stdout = String::from_utf8(output.stdout).context("ffprobe output is not valid UTF-8")?;
    parse_probe_json(&stdout)
}

/// Parse `ffprobe -print_format json` output.
///
/// The main video stream is the one flagged default, else the first one with
/// known dimensions.
pub fn parse_probe_json(json: &str) -> Result<ProbedMedia> {
    let output: FfprobeOutput =
        serde_json::from_str(json).context("Failed to parse ffprobe JSON output")?;

    let (duration, format_name) = match output.format {
        Some(fmt) => (
            fmt.duration.and_then(|d| d.parse::<f64>().ok()),
            fmt.format_name,
        ),
        None => (None, None),
    };

    let videos: Vec<VideoInfo> = output
        .streams
        .unwrap_or_default()
        .into_iter()
        .filter(|s| s.codec_type == "video")
        .filter_map(|s| {
            let (width, height) = (s.width?, s.height?);
            Some(VideoInfo {
                index: s.index,
                codec_name: s.codec_name.unwrap_or_default(),
                width,
                height,
                is_default: s
                    .disposition
                    .and_then(|d| d.default)
                    .map(|v| v == 1)
                    .unwrap_or(false),
            })
        })
        .collect();

    let video = videos
        .iter()
        .find(|v| v.is_default)
        .or_else(|| videos.first())
        .cloned();

    Ok(ProbedMedia {
        duration,
        format_name,
        video,
    })
}
