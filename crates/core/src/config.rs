use crate::coordinates::CoordinateSpec;
use crate::error::FilterError;
use crate::filters::{Filter, WatermarkFilter};
use crate::scale::ScaleSpec;
use crate::time_gate::TimeWindow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ffmpeg_binary: String,
    pub ffprobe_binary: String,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Container name passed to filters as part of their format context
    pub container: Option<String>,
    pub filters: Vec<FilterConfig>,
}

/// One filter entry, selected by its `kind` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterConfig {
    Watermark {
        path: PathBuf,
        #[serde(default)]
        coordinates: CoordinateSpec,
        #[serde(default)]
        scale: ScaleSpec,
        #[serde(default)]
        time: TimeWindow,
        #[serde(default)]
        priority: i32,
    },
}

impl FilterConfig {
    /// Construct the filter, running its construction-time checks
    pub fn build(&self) -> Result<Box<dyn Filter>, FilterError> {
        match self {
            FilterConfig::Watermark {
                path,
                coordinates,
                scale,
                time,
                priority,
            } => Ok(Box::new(WatermarkFilter::new(
                path,
                coordinates.clone(),
                *scale,
                time.clone(),
                *priority,
            )?)),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ffmpeg_binary: "ffmpeg".to_string(),
            ffprobe_binary: "ffprobe".to_string(),
            input: None,
            output: None,
            container: None,
            filters: Vec::new(),
        }
    }
}

pub fn load_config(path: Option<&std::path::Path>) -> Result<PipelineConfig> {
    let config = if let Some(config_path) = path {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

            toml::from_str::<PipelineConfig>(&contents)
                .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))?
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", config_path);
            PipelineConfig::default()
        }
    } else {
        tracing::info!("No config path provided, using defaults");
        PipelineConfig::default()
    };

    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    if config.ffmpeg_binary.trim().is_empty() {
        anyhow::bail!("ffmpeg_binary cannot be empty");
    }

    if config.ffprobe_binary.trim().is_empty() {
        anyhow::bail!("ffprobe_binary cannot be empty");
    }

    for (i, filter) in config.filters.iter().enumerate() {
        match filter {
            FilterConfig::Watermark { scale, .. } => {
                // A half pair is ignored, so only a complete one can be invalid
                if let Some(d) = scale.dimension() {
                    if d.width == 0 || d.height == 0 {
                        anyhow::bail!("filters[{}]: scale dimensions must be positive", i);
                    }
                }
            }
        }
    }

    Ok(())
}
