//! Brush appearance.

#[cfg(test)]
#[path = "brush_test.rs"]
mod brush_test;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::geometry::Point;

/// Shape of the brush tip.
///
/// Serialized in the client form `{"shape": "circle"}`; a custom tip carries
/// its polygons under `customShape`, and only a custom tip does.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum BrushShape {
    #[default]
    Circle,
    Square,
    Custom {
        /// Closed point loops; the last point of each loop joins the first.
        #[serde(rename = "customShape")]
        polygons: Vec<Vec<Point>>,
    },
}

/// How a stroke is painted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brush {
    pub brush_shape: BrushShape,
    pub color: HexColor,
    /// Diameter in document units, strictly positive.
    pub width: f32,
    /// Edge softness, passed through to the renderer untouched.
    pub diffusion: u64,
    /// Remove pixels instead of painting them.
    pub erase: bool,
}

impl Brush {
    /// True when the width is a usable positive number.
    #[must_use]
    pub fn has_valid_width(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            brush_shape: BrushShape::Circle,
            color: HexColor::default(),
            width: 10.0,
            diffusion: 0,
            erase: false,
        }
    }
}
