use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::filters::Filter;
use crate::media::{FormatContext, MediaAsset};
use crate::tool::ToolVersion;
use tracing::{debug, warn};

/// Filters waiting to be merged into one invocation.
///
/// Filters that share a complex graph all use the `[in]`/`[out]` labels; the
/// pipeline does not rename them, so callers must not combine filters whose
/// labels collide.
#[derive(Debug, Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured filter; the first construction failure aborts assembly
    pub fn from_configs(configs: &[FilterConfig]) -> Result<Self, FilterError> {
        let mut pipeline = Self::new();
        for config in configs {
            pipeline.push(config.build()?);
        }
        Ok(pipeline)
    }

    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.push(Box::new(filter))
    }

    pub fn push(&mut self, filter: Box<dyn Filter>) -> &mut Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters by ascending priority, insertion order among equals
    pub fn sorted(&self) -> Vec<&dyn Filter> {
        sort_by_priority(&self.filters)
    }

    pub fn compile(&self, context: &FormatContext) -> Vec<String> {
        compile_filters(&self.filters, context)
    }

    /// Same ordering as [`compile`](Self::compile), through each filter's complex-graph path
    pub fn compile_complex(&self, media: &dyn MediaAsset) -> Vec<String> {
        self.sorted()
            .into_iter()
            .flat_map(|f| f.apply_complex(media))
            .collect()
    }

    /// Names of filters that need a newer ffmpeg than `detected`.
    ///
    /// Advisory only: each offender is logged and nothing is rejected.
    pub fn check_tool_version(&self, detected: &ToolVersion) -> Vec<String> {
        let mut unsupported = Vec::new();
        for filter in self.sorted() {
            match filter.minimum_tool_version().parse::<ToolVersion>() {
                Ok(floor) if *detected < floor => {
                    warn!(
                        "Filter {} requires ffmpeg {} or newer, found {}",
                        filter.name(),
                        filter.minimum_tool_version(),
                        detected
                    );
                    unsupported.push(filter.name().to_string());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Filter {} declares an unreadable version: {}", filter.name(), e);
                }
            }
        }
        unsupported
    }
}

/// Stable-sort filters by priority and concatenate their fragments
pub fn compile_filters(filters: &[Box<dyn Filter>], context: &FormatContext) -> Vec<String> {
    let mut args = Vec::new();
    for filter in sort_by_priority(filters) {
        debug!(
            "Compiling filter {} (priority {})",
            filter.name(),
            filter.priority()
        );
        args.extend(filter.compile_fragment(context));
    }
    args
}

fn sort_by_priority(filters: &[Box<dyn Filter>]) -> Vec<&dyn Filter> {
    let mut sorted: Vec<&dyn Filter> = filters.iter().map(|f| f.as_ref()).collect();
    // sort_by_key is stable, which keeps insertion order among equal priorities
    sorted.sort_by_key(|f| f.priority());
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker {
        label: &'static str,
        priority: i32,
        floor: &'static str,
    }

    impl Filter for Marker {
        fn name(&self) -> &str {
            self.label
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn minimum_tool_version(&self) -> &str {
            self.floor
        }

        fn compile_fragment(&self, _context: &FormatContext) -> Vec<String> {
            vec![self.label.to_string()]
        }
    }

    fn marker(label: &'static str, priority: i32) -> Marker {
        Marker {
            label,
            priority,
            floor: "0.8",
        }
    }

    #[test]
    fn test_empty_pipeline_compiles_to_nothing() {
        let pipeline = FilterPipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.compile(&FormatContext::default()).is_empty());
    }

    #[test]
    fn test_negative_priorities_come_first() {
        let mut pipeline = FilterPipeline::new();
        pipeline.add(marker("zero", 0)).add(marker("minus", -1));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(
            pipeline.compile(&FormatContext::default()),
            vec!["minus".to_string(), "zero".to_string()]
        );
    }

    #[test]
    fn test_check_tool_version() {
        let mut pipeline = FilterPipeline::new();
        pipeline.add(marker("old", 0)).add(Marker {
            label: "new",
            priority: 1,
            floor: "7.1",
        });

        assert_eq!(
            pipeline.check_tool_version(&ToolVersion::new(6, 0, 0)),
            vec!["new".to_string()]
        );
        assert!(pipeline
            .check_tool_version(&ToolVersion::new(7, 1, 0))
            .is_empty());
        assert_eq!(
            pipeline.check_tool_version(&ToolVersion::new(0, 7, 9)),
            vec!["old".to_string(), "new".to_string()]
        );
    }

    #[test]
    fn test_unreadable_floor_is_not_reported() {
        let mut pipeline = FilterPipeline::new();
        pipeline.add(Marker {
            label: "odd",
            priority: 0,
            floor: "latest",
        });
        assert!(pipeline
            .check_tool_version(&ToolVersion::new(1, 0, 0))
            .is_empty());
    }
}
