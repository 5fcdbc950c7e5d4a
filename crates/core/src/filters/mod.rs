pub mod watermark;

use crate::media::{FormatContext, MediaAsset};
use std::fmt;

pub use watermark::WatermarkFilter;

/// A unit that contributes command-line tokens to an ffmpeg invocation.
///
/// Filters are immutable once built; everything that can go wrong is checked
/// by the constructor, so compiling a fragment cannot fail.
pub trait Filter: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Ordering key; lower values are emitted first
    fn priority(&self) -> i32;

    /// Oldest ffmpeg release known to support the filter (advisory)
    fn minimum_tool_version(&self) -> &str;

    fn compile_fragment(&self, context: &FormatContext) -> Vec<String>;

    /// Single-filter path, applied while encoding one input to one format
    fn apply(&self, _media: &dyn MediaAsset, context: &FormatContext) -> Vec<String> {
        self.compile_fragment(context)
    }

    /// Complex-graph path; shares `compile_fragment` so both paths emit the same text
    fn apply_complex(&self, media: &dyn MediaAsset) -> Vec<String> {
        self.compile_fragment(&FormatContext::from_media(media, None))
    }
}
