// ffmpeg filter-graph composition

pub mod config;
pub mod coordinates;
pub mod error;
pub mod filters;
pub mod grammar;
pub mod invoke;
pub mod media;
pub mod pipeline;
pub mod scale;
pub mod time_gate;
pub mod tool;

// Re-export commonly used types
pub use config::{FilterConfig, PipelineConfig};
pub use coordinates::CoordinateSpec;
pub use error::FilterError;
pub use filters::{Filter, WatermarkFilter};
pub use media::{FormatContext, MediaAsset};
pub use pipeline::FilterPipeline;
pub use scale::ScaleSpec;
pub use time_gate::TimeWindow;
