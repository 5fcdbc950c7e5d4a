use serde::{Deserialize, Serialize};

/// Requested overlay size; only a complete pair produces a scale clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl ScaleSpec {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
        }
    }

    pub fn dimension(&self) -> Option<Dimension> {
        match (self.w, self.h) {
            (Some(width), Some(height)) => Some(Dimension { width, height }),
            _ => None,
        }
    }
}

/// `,scale=W:H` chained after the movie source, or nothing at all
pub fn scale_fragment(dimension: Option<Dimension>) -> String {
    match dimension {
        Some(d) => format!(",scale={}:{}", d.width, d.height),
        None => String::new(),
    }
}
