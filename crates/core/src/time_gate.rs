use crate::grammar::{present, Expr, TIME_VAR};
use serde::{Deserialize, Serialize};

/// Optional playback window during which a filter is active
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Expr>,
}

impl TimeWindow {
    pub fn between(start: impl Into<Expr>, end: impl Into<Expr>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    pub fn from_start(start: impl Into<Expr>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }

    /// An `end` without a `start` does not gate anything
    pub fn is_end_only(&self) -> bool {
        present(&self.start).is_none() && present(&self.end).is_some()
    }
}

/// Compile a time window into a timeline predicate over `t`.
///
/// Returns an empty string when no start is set, including the end-only case.
pub fn compile_time_gate(window: &TimeWindow) -> String {
    match (present(&window.start), present(&window.end)) {
        (Some(start), Some(end)) => format!("between({},{},{})", TIME_VAR, start, end),
        (Some(start), None) => format!("gte({},{})", TIME_VAR, start),
        (None, _) => String::new(),
    }
}

/// Wrap a predicate as a timeline `enable` option, or nothing for an empty predicate
pub fn enable_clause(predicate: &str) -> String {
    if predicate.is_empty() {
        String::new()
    } else {
        format!(" :enable='{}'", predicate)
    }
}
