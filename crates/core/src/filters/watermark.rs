// Image watermark overlaid through a movie source

use super::Filter;
use crate::coordinates::{resolve_coordinates, CoordinateSpec};
use crate::error::FilterError;
use crate::grammar::{LABEL_IN, LABEL_OUT, LABEL_WATERMARK, VIDEO_FILTER_FLAG};
use crate::media::FormatContext;
use crate::scale::{scale_fragment, Dimension, ScaleSpec};
use crate::time_gate::{compile_time_gate, enable_clause, TimeWindow};
use std::path::Path;
use tracing::{debug, warn};

pub const WATERMARK_NAME: &str = "watermark";
pub const WATERMARK_MIN_VERSION: &str = "0.8";

#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkFilter {
    watermark_path: String,
    coordinates: CoordinateSpec,
    scale: Option<Dimension>,
    time: TimeWindow,
    priority: i32,
}

impl WatermarkFilter {
    /// Build a watermark filter, failing fast if the image does not exist.
    ///
    /// A scale spec with only one side set is ignored; a zero side is rejected.
    pub fn new(
        watermark_path: impl AsRef<Path>,
        coordinates: CoordinateSpec,
        scale: ScaleSpec,
        time: TimeWindow,
        priority: i32,
    ) -> Result<Self, FilterError> {
        let path = watermark_path.as_ref();
        if !path.is_file() {
            return Err(FilterError::invalid_configuration(format!(
                "File {} does not exist",
                path.display()
            )));
        }

        let scale = scale.dimension();
        if let Some(d) = scale {
            if d.width == 0 || d.height == 0 {
                return Err(FilterError::invalid_configuration(format!(
                    "Watermark scale {}x{} must be positive",
                    d.width, d.height
                )));
            }
        }

        if time.is_end_only() {
            warn!(
                "Watermark {} has an end time but no start time; it will not be time-gated",
                path.display()
            );
        }

        Ok(Self {
            watermark_path: path.to_string_lossy().into_owned(),
            coordinates,
            scale,
            time,
            priority,
        })
    }

    /// The overlay graph, without the `-vf` switch
    pub fn graph(&self) -> String {
        let (x, y) = resolve_coordinates(&self.coordinates);
        let enable = enable_clause(&compile_time_gate(&self.time));

        format!(
            "movie={}{} {}; {}{} overlay={}:{}{} {}",
            self.watermark_path,
            scale_fragment(self.scale),
            LABEL_WATERMARK,
            LABEL_IN,
            LABEL_WATERMARK,
            x,
            y,
            enable,
            LABEL_OUT
        )
    }
}

impl Filter for WatermarkFilter {
    fn name(&self) -> &str {
        WATERMARK_NAME
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn minimum_tool_version(&self) -> &str {
        WATERMARK_MIN_VERSION
    }

    fn compile_fragment(&self, _context: &FormatContext) -> Vec<String> {
        let graph = self.graph();
        debug!("Compiled watermark graph: {}", graph);
        vec![VIDEO_FILTER_FLAG.to_string(), graph]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn asset(dir: &TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"png").unwrap();
        path
    }

    #[test]
    fn test_graph_for_default_config() {
        let dir = TempDir::new().unwrap();
        let path = asset(&dir, "logo.png");
        let filter = WatermarkFilter::new(
            &path,
            CoordinateSpec::default(),
            ScaleSpec::default(),
            TimeWindow::default(),
            0,
        )
        .unwrap();

        assert_eq!(
            filter.graph(),
            format!(
                "movie={} [watermark]; [in][watermark] overlay=0:0 [out]",
                path.display()
            )
        );
    }

    #[test]
    fn test_metadata() {
        let dir = TempDir::new().unwrap();
        let filter = WatermarkFilter::new(
            asset(&dir, "logo.png"),
            CoordinateSpec::default(),
            ScaleSpec::default(),
            TimeWindow::default(),
            -3,
        )
        .unwrap();

        assert_eq!(filter.name(), "watermark");
        assert_eq!(filter.priority(), -3);
        assert_eq!(filter.minimum_tool_version(), "0.8");
    }

    #[test]
    fn test_zero_scale_rejected() {
        let dir = TempDir::new().unwrap();
        let result = WatermarkFilter::new(
            asset(&dir, "logo.png"),
            CoordinateSpec::default(),
            ScaleSpec::new(0, 64),
            TimeWindow::default(),
            0,
        );
        assert!(matches!(result, Err(FilterError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_directory_is_not_an_asset() {
        let dir = TempDir::new().unwrap();
        let result = WatermarkFilter::new(
            dir.path(),
            CoordinateSpec::default(),
            ScaleSpec::default(),
            TimeWindow::default(),
            0,
        );
        assert!(matches!(result, Err(FilterError::InvalidConfiguration(_))));
    }
}
