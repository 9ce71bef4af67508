//! Shared drawing model for the collaborative canvas client.
//!
//! This crate holds the client-side view of a drawing: value types for points,
//! colors, brushes and drawable instructions, and the layered document whose
//! per-layer history carries an undo/redo cursor. Everything here is plain,
//! synchronous data; the wire representation lives in the `frames` crate and
//! the network plumbing in `client`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Points, dimensions and the pointer-to-document ratio |
//! | [`color`] | Validated hex colors compared by RGBA value |
//! | [`brush`] | Brush appearance and brush shapes |
//! | [`instruction`] | Strokes, motions, image insertions and their identity box |
//! | [`layer`] | A single layer's history and undo cursor |
//! | [`drawing`] | Named, ordered layers and the document operations |
//! | [`document`] | Observable wrapper that notifies subscribers on change |
//! | [`error`] | Structural errors raised by document operations |

pub mod brush;
pub mod color;
pub mod document;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod instruction;
pub mod layer;

pub use brush::{Brush, BrushShape};
pub use color::{ColorError, HexColor};
pub use document::{Change, Document, SubscriptionId};
pub use drawing::Drawing;
pub use error::DrawingError;
pub use geometry::{Dimensions, Point};
pub use instruction::{ImageInsertion, Instruction, InstructionBox, Motion, Stroke};
pub use layer::Layer;
