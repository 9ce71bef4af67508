//! Points and canvas dimensions.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in document space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a canvas element or of a drawing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale factor from on-screen canvas pixels to document units.
    ///
    /// The drawing is fitted inside `canvas` keeping its aspect ratio: height
    /// decides the ratio unless the scaled width would overflow, in which case
    /// width decides.
    #[must_use]
    pub fn ratio(canvas: Dimensions, drawing: Dimensions) -> f64 {
        let ratio = drawing.height / canvas.height;
        if drawing.width / ratio > canvas.width {
            drawing.width / canvas.width
        } else {
            ratio
        }
    }
}
