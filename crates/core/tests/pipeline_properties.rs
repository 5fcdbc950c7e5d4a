use ffgraph_core::config::FilterConfig;
use ffgraph_core::coordinates::CoordinateSpec;
use ffgraph_core::error::FilterError;
use ffgraph_core::filters::{Filter, WatermarkFilter};
use ffgraph_core::media::{FormatContext, MediaAsset};
use ffgraph_core::pipeline::{compile_filters, FilterPipeline};
use ffgraph_core::scale::ScaleSpec;
use ffgraph_core::time_gate::TimeWindow;
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Emits a single token identifying its insertion slot
#[derive(Debug)]
struct Tagged {
    slot: usize,
    priority: i32,
}

impl Filter for Tagged {
    fn name(&self) -> &str {
        "tagged"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn minimum_tool_version(&self) -> &str {
        "0.8"
    }

    fn compile_fragment(&self, _context: &FormatContext) -> Vec<String> {
        vec![format!("p{}#{}", self.priority, self.slot)]
    }
}

struct FixedMedia;

impl MediaAsset for FixedMedia {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((1920, 1080))
    }

    fn duration(&self) -> Option<f64> {
        Some(30.0)
    }
}

fn asset(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"png").unwrap();
    path
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Output follows ascending priority, and equal priorities keep insertion order
    #[test]
    fn prop_stable_priority_order(priorities in prop::collection::vec(-5i32..5, 0..20)) {
        let mut pipeline = FilterPipeline::new();
        for (slot, priority) in priorities.iter().enumerate() {
            pipeline.add(Tagged { slot, priority: *priority });
        }

        let args = pipeline.compile(&FormatContext::default());

        let mut expected: Vec<(i32, usize)> =
            priorities.iter().copied().enumerate().map(|(slot, p)| (p, slot)).collect();
        expected.sort();
        let expected: Vec<String> = expected
            .into_iter()
            .map(|(p, slot)| format!("p{}#{}", p, slot))
            .collect();

        prop_assert_eq!(args, expected);
    }

    /// The pipeline adds nothing of its own: the output is the fragments concatenated
    #[test]
    fn prop_output_is_concatenation(priorities in prop::collection::vec(-5i32..5, 0..20)) {
        let filters: Vec<Box<dyn Filter>> = priorities
            .iter()
            .enumerate()
            .map(|(slot, p)| Box::new(Tagged { slot, priority: *p }) as Box<dyn Filter>)
            .collect();

        let args = compile_filters(&filters, &FormatContext::default());
        prop_assert_eq!(args.len(), filters.len());
    }
}

#[test]
fn test_priority_order_with_ties() {
    let mut pipeline = FilterPipeline::new();
    pipeline
        .add(Tagged { slot: 0, priority: 5 })
        .add(Tagged { slot: 1, priority: 1 })
        .add(Tagged { slot: 2, priority: 1 })
        .add(Tagged { slot: 3, priority: 3 });

    assert_eq!(
        pipeline.compile(&FormatContext::default()),
        vec!["p1#1", "p1#2", "p3#3", "p5#0"]
    );
}

#[test]
fn test_watermarks_ordered_and_concatenated() {
    let dir = TempDir::new().unwrap();
    let late = asset(&dir, "late.png");
    let early = asset(&dir, "early.png");

    let mut pipeline = FilterPipeline::new();
    pipeline
        .add(
            WatermarkFilter::new(
                &late,
                CoordinateSpec::default(),
                ScaleSpec::default(),
                TimeWindow::default(),
                10,
            )
            .unwrap(),
        )
        .add(
            WatermarkFilter::new(
                &early,
                CoordinateSpec::absolute(5, 5),
                ScaleSpec::default(),
                TimeWindow::default(),
                -1,
            )
            .unwrap(),
        );

    let args = pipeline.compile(&FormatContext::default());
    assert_eq!(args.len(), 4);
    assert_eq!(args[0], "-vf");
    assert!(args[1].starts_with(&format!("movie={} ", early.display())));
    assert!(args[1].contains("overlay=5:5"));
    assert_eq!(args[2], "-vf");
    assert!(args[3].starts_with(&format!("movie={} ", late.display())));
}

#[test]
fn test_apply_paths_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let filter = WatermarkFilter::new(
        asset(&dir, "logo.png"),
        CoordinateSpec::relative().bottom(10).right(10),
        ScaleSpec::new(64, 64),
        TimeWindow::between(1, 4),
        0,
    )
    .unwrap();

    let media = FixedMedia;
    let context = FormatContext::from_media(&media, Some("mp4".to_string()));
    assert_eq!(filter.apply(&media, &context), filter.apply_complex(&media));

    let mut pipeline = FilterPipeline::new();
    pipeline.add(filter);
    assert_eq!(pipeline.compile(&context), pipeline.compile_complex(&media));
}

#[test]
fn test_from_configs_aborts_on_missing_asset() {
    let dir = TempDir::new().unwrap();
    let good = asset(&dir, "good.png");

    let configs = vec![
        FilterConfig::Watermark {
            path: good,
            coordinates: CoordinateSpec::default(),
            scale: ScaleSpec::default(),
            time: TimeWindow::default(),
            priority: 0,
        },
        FilterConfig::Watermark {
            path: dir.path().join("missing.png"),
            coordinates: CoordinateSpec::default(),
            scale: ScaleSpec::default(),
            time: TimeWindow::default(),
            priority: 1,
        },
    ];

    let result = FilterPipeline::from_configs(&configs);
    assert!(matches!(result, Err(FilterError::InvalidConfiguration(_))));
}

#[test]
fn test_from_configs_builds_every_entry() {
    let dir = TempDir::new().unwrap();
    let configs: Vec<FilterConfig> = ["a.png", "b.png", "c.png"]
        .iter()
        .enumerate()
        .map(|(i, name)| FilterConfig::Watermark {
            path: asset(&dir, name),
            coordinates: CoordinateSpec::default(),
            scale: ScaleSpec::default(),
            time: TimeWindow::default(),
            priority: 2 - i as i32,
        })
        .collect();

    let pipeline = FilterPipeline::from_configs(&configs).unwrap();
    assert_eq!(pipeline.len(), 3);

    let priorities: Vec<i32> = pipeline.sorted().iter().map(|f| f.priority()).collect();
    assert_eq!(priorities, vec![0, 1, 2]);
}
