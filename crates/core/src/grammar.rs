// Reserved words and value type of the ffmpeg filter-graph language

use serde::{Deserialize, Serialize};
use std::fmt;

/// Switch that applies a simple video filter graph
pub const VIDEO_FILTER_FLAG: &str = "-vf";

/// Base frame width / height inside an overlay expression
pub const MAIN_W: &str = "main_w";
pub const MAIN_H: &str = "main_h";

/// Overlaid frame width / height inside an overlay expression
pub const OVERLAY_W: &str = "overlay_w";
pub const OVERLAY_H: &str = "overlay_h";

/// Current timestamp variable used by timeline editing
pub const TIME_VAR: &str = "t";

pub const LABEL_IN: &str = "[in]";
pub const LABEL_OUT: &str = "[out]";
pub const LABEL_WATERMARK: &str = "[watermark]";

/// A number or a symbolic expression, emitted verbatim into the graph.
///
/// Configuration files may write `bottom = 10`, `bottom = 2.5` or
/// `bottom = "main_h/4"`; all three end up as text in the expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Expr {
    /// Empty text is treated the same as an unset field
    pub fn is_blank(&self) -> bool {
        matches!(self, Expr::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(v) => write!(f, "{}", v),
            Expr::Float(v) => write!(f, "{}", v),
            Expr::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Int(v)
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Expr::Int(i64::from(v))
    }
}

impl From<u32> for Expr {
    fn from(v: u32) -> Self {
        Expr::Int(i64::from(v))
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Float(v)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Text(s.to_string())
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Text(s)
    }
}

/// Drop blank values so the builders only ever see meaningful input
pub(crate) fn present(value: &Option<Expr>) -> Option<&Expr> {
    value.as_ref().filter(|v| !v.is_blank())
}
