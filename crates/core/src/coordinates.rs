use crate::grammar::{present, Expr, MAIN_H, MAIN_W, OVERLAY_H, OVERLAY_W};
use serde::{Deserialize, Serialize};

/// Where an overlay is placed on the base frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCoordinates", into = "RawCoordinates")]
pub enum CoordinateSpec {
    Absolute {
        x: Option<Expr>,
        y: Option<Expr>,
    },
    /// Distances from the frame edges. `top` beats `bottom`, `left` beats `right`.
    Relative {
        top: Option<Expr>,
        bottom: Option<Expr>,
        left: Option<Expr>,
        right: Option<Expr>,
    },
}

impl Default for CoordinateSpec {
    fn default() -> Self {
        CoordinateSpec::Absolute { x: None, y: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    #[default]
    Absolute,
    Relative,
}

// Anything other than "relative" places the overlay absolutely
impl<'de> Deserialize<'de> for PositionMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mode = String::deserialize(deserializer)?;
        Ok(match mode.as_str() {
            "relative" => PositionMode::Relative,
            _ => PositionMode::Absolute,
        })
    }
}

/// Flat table form used in configuration files; `position` defaults to absolute
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawCoordinates {
    position: PositionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    left: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<Expr>,
}

impl From<RawCoordinates> for CoordinateSpec {
    fn from(raw: RawCoordinates) -> Self {
        match raw.position {
            PositionMode::Absolute => CoordinateSpec::Absolute { x: raw.x, y: raw.y },
            PositionMode::Relative => CoordinateSpec::Relative {
                top: raw.top,
                bottom: raw.bottom,
                left: raw.left,
                right: raw.right,
            },
        }
    }
}

impl From<CoordinateSpec> for RawCoordinates {
    fn from(spec: CoordinateSpec) -> Self {
        match spec {
            CoordinateSpec::Absolute { x, y } => RawCoordinates {
                position: PositionMode::Absolute,
                x,
                y,
                ..Default::default()
            },
            CoordinateSpec::Relative {
                top,
                bottom,
                left,
                right,
            } => RawCoordinates {
                position: PositionMode::Relative,
                top,
                bottom,
                left,
                right,
                ..Default::default()
            },
        }
    }
}

impl CoordinateSpec {
    pub fn absolute(x: impl Into<Expr>, y: impl Into<Expr>) -> Self {
        CoordinateSpec::Absolute {
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    /// Relative placement with every edge unset; fill in with the builder methods
    pub fn relative() -> Self {
        CoordinateSpec::Relative {
            top: None,
            bottom: None,
            left: None,
            right: None,
        }
    }

    pub fn top(self, value: impl Into<Expr>) -> Self {
        self.with_edge(Edge::Top, value.into())
    }

    pub fn bottom(self, value: impl Into<Expr>) -> Self {
        self.with_edge(Edge::Bottom, value.into())
    }

    pub fn left(self, value: impl Into<Expr>) -> Self {
        self.with_edge(Edge::Left, value.into())
    }

    pub fn right(self, value: impl Into<Expr>) -> Self {
        self.with_edge(Edge::Right, value.into())
    }

    fn with_edge(self, edge: Edge, value: Expr) -> Self {
        let (mut top, mut bottom, mut left, mut right) = match self {
            CoordinateSpec::Relative {
                top,
                bottom,
                left,
                right,
            } => (top, bottom, left, right),
            // Switching an absolute spec to edges discards x/y
            CoordinateSpec::Absolute { .. } => (None, None, None, None),
        };
        match edge {
            Edge::Top => top = Some(value),
            Edge::Bottom => bottom = Some(value),
            Edge::Left => left = Some(value),
            Edge::Right => right = Some(value),
        }
        CoordinateSpec::Relative {
            top,
            bottom,
            left,
            right,
        }
    }
}

enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Resolve a coordinate spec into the `(x, y)` expressions of an overlay clause.
///
/// Nothing is computed here: relative placements become arithmetic that
/// ffmpeg evaluates against the frame sizes at render time.
pub fn resolve_coordinates(spec: &CoordinateSpec) -> (String, String) {
    match spec {
        CoordinateSpec::Absolute { x, y } => (or_zero(present(x)), or_zero(present(y))),
        CoordinateSpec::Relative {
            top,
            bottom,
            left,
            right,
        } => {
            let y = edge_expr(present(top), present(bottom), MAIN_H, OVERLAY_H);
            let x = edge_expr(present(left), present(right), MAIN_W, OVERLAY_W);
            (x, y)
        }
    }
}

fn edge_expr(near: Option<&Expr>, far: Option<&Expr>, main: &str, overlay: &str) -> String {
    match (near, far) {
        (Some(near), _) => near.to_string(),
        (None, Some(far)) => format!("{} - {} - {}", main, far, overlay),
        (None, None) => "0".to_string(),
    }
}

fn or_zero(value: Option<&Expr>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "0".to_string())
}
