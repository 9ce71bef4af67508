//! Server-side JSON shapes.
//!
//! The server serializes its own Rust enums with serde's default externally
//! tagged layout: unit variants become bare strings, everything else a
//! single-key object. Field names stay snake_case.

use drawing::{ImageInsertion, Motion, Point};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum WireMessage {
    RequestInit,
    Init(WireInit),
    Join(String),
    CursorIn(Option<WireCursor>),
    CursorOut(WireCursorOut),
    Instruction(WireLayerInstruction),
    TempDraw(WireTempDraw),
    ToggleLayerVisibility(String),
    Undo(String),
    Redo(String),
    AddLayer(String),
    LayerUp(String),
    LayerDown(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct WireColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum WireBrushShape {
    Circle,
    Square,
    Custom { points: Vec<Vec<Point>> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireBrush {
    pub brush_shape: WireBrushShape,
    pub color: WireColor,
    pub width: f32,
    pub diffusion: u64,
    pub erase: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireStroke {
    pub points: Vec<Point>,
    pub brush: WireBrush,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum WireInstruction {
    Stroke(WireStroke),
    Motion(Motion),
    ImageInsertion(ImageInsertion),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireInstructionBox {
    pub instruction: WireInstruction,
    pub uuid: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireLayer {
    pub history: Vec<WireInstructionBox>,
    pub history_index: usize,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireDrawing {
    pub width: u32,
    pub height: u32,
    pub layers: IndexMap<String, WireLayer>,
    pub layer_order: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireInit {
    pub drawing: WireDrawing,
    pub users: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireCursor {
    pub point: Point,
    pub brush: WireBrush,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireCursorOut {
    pub cursor: Option<WireCursor>,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireLayerInstruction {
    pub layer: String,
    pub instruction: WireInstructionBox,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireTempDraw {
    pub brush: WireBrush,
    pub uuid: String,
    pub start: Point,
    pub end: Point,
    pub layer: String,
}
