//! Drawable instructions and the identity box that wraps them.
//!
//! The client form of an instruction carries no tag; a stroke is recognised by
//! its `points`, a motion by its `selection`, anything else must be an image.
//! Serde's untagged representation matches that shape and still fails when
//! none of the three fit.

#[cfg(test)]
#[path = "instruction_test.rs"]
mod instruction_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brush::Brush;
use crate::error::DrawingError;
use crate::geometry::Point;

/// A painted polyline. A single point renders as a dot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub brush: Brush,
}

/// A move or selection drag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub start: Point,
    pub end: Point,
    /// Upper-left and lower-right corners of the moved region.
    pub selection: (Point, Point),
}

/// An embedded raster image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageInsertion {
    pub base64: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instruction {
    Stroke(Stroke),
    Motion(Motion),
    ImageInsertion(ImageInsertion),
}

impl Instruction {
    /// Strokes must hold at least one point to be drawable.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        match self {
            Self::Stroke(stroke) => !stroke.points.is_empty(),
            Self::Motion(_) | Self::ImageInsertion(_) => true,
        }
    }

    /// Check that the instruction can enter a layer history and be sent as is.
    ///
    /// # Errors
    ///
    /// [`DrawingError::EmptyStroke`], [`DrawingError::InvalidBrushWidth`] or
    /// [`DrawingError::MissingImagePosition`].
    pub fn validate(&self) -> Result<(), DrawingError> {
        match self {
            Self::Stroke(stroke) if stroke.points.is_empty() => Err(DrawingError::EmptyStroke),
            Self::Stroke(stroke) if !stroke.brush.has_valid_width() => {
                Err(DrawingError::InvalidBrushWidth)
            }
            Self::ImageInsertion(image) if image.position.is_none() => {
                Err(DrawingError::MissingImagePosition)
            }
            Self::Stroke(_) | Self::Motion(_) | Self::ImageInsertion(_) => Ok(()),
        }
    }
}

/// An instruction paired with the id other clients use to refer to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstructionBox {
    pub instruction: Instruction,
    pub uuid: String,
}

impl InstructionBox {
    /// Box an instruction under a freshly generated v4 UUID.
    #[must_use]
    pub fn new(instruction: Instruction) -> Self {
        Self { instruction, uuid: Uuid::new_v4().to_string() }
    }

    #[must_use]
    pub fn with_uuid(instruction: Instruction, uuid: impl Into<String>) -> Self {
        Self { instruction, uuid: uuid.into() }
    }
}
