//! Client-side message values.
//!
//! These carry `drawing` types (hex colors, camelCase brushes, untagged
//! instructions). The `wire` module holds the server's shapes and
//! [`crate::decode_message`] / [`crate::encode_message`] translate between the two.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use std::fmt;

use drawing::{Brush, Drawing, InstructionBox, Point};

/// Discriminant of a [`Message`], read from the envelope's sole key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    RequestInit,
    Init,
    Join,
    CursorIn,
    CursorOut,
    Instruction,
    TempDraw,
    ToggleLayerVisibility,
    Undo,
    Redo,
    AddLayer,
    LayerUp,
    LayerDown,
}

impl MessageKind {
    pub const ALL: [Self; 13] = [
        Self::RequestInit,
        Self::Init,
        Self::Join,
        Self::CursorIn,
        Self::CursorOut,
        Self::Instruction,
        Self::TempDraw,
        Self::ToggleLayerVisibility,
        Self::Undo,
        Self::Redo,
        Self::AddLayer,
        Self::LayerUp,
        Self::LayerDown,
    ];

    /// The envelope key, e.g. `"ToggleLayerVisibility"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequestInit => "RequestInit",
            Self::Init => "Init",
            Self::Join => "Join",
            Self::CursorIn => "CursorIn",
            Self::CursorOut => "CursorOut",
            Self::Instruction => "Instruction",
            Self::TempDraw => "TempDraw",
            Self::ToggleLayerVisibility => "ToggleLayerVisibility",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::AddLayer => "AddLayer",
            Self::LayerUp => "LayerUp",
            Self::LayerDown => "LayerDown",
        }
    }

    /// Lower-cased envelope key, used as the event name in logs.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::RequestInit => "requestinit",
            Self::Init => "init",
            Self::Join => "join",
            Self::CursorIn => "cursorin",
            Self::CursorOut => "cursorout",
            Self::Instruction => "instruction",
            Self::TempDraw => "tempdraw",
            Self::ToggleLayerVisibility => "togglelayervisibility",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::AddLayer => "addlayer",
            Self::LayerUp => "layerup",
            Self::LayerDown => "layerdown",
        }
    }

    /// Look up a kind by its envelope key. Matching is exact.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's pointer and the brush it would paint with.
#[derive(Clone, Debug, PartialEq)]
pub struct Cursor {
    pub point: Point,
    pub brush: Brush,
}

/// Full snapshot sent in reply to `RequestInit`.
#[derive(Clone, Debug, PartialEq)]
pub struct Init {
    pub drawing: Drawing,
    pub users: Vec<String>,
}

/// Another user's cursor, relayed by the server. `None` means the cursor
/// left the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorOut {
    pub cursor: Option<Cursor>,
    pub username: String,
}

/// A committed instruction for a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerInstruction {
    pub layer: String,
    pub instruction: InstructionBox,
}

/// One segment of an in-progress stroke, keyed by the uuid the finished
/// instruction will carry.
#[derive(Clone, Debug, PartialEq)]
pub struct TempDraw {
    pub brush: Brush,
    pub uuid: String,
    pub start: Point,
    pub end: Point,
    pub layer: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    RequestInit,
    Init(Init),
    Join(String),
    CursorIn(Option<Cursor>),
    CursorOut(CursorOut),
    Instruction(LayerInstruction),
    TempDraw(TempDraw),
    ToggleLayerVisibility(String),
    Undo(String),
    Redo(String),
    AddLayer(String),
    LayerUp(String),
    LayerDown(String),
}

impl Message {
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::RequestInit => MessageKind::RequestInit,
            Self::Init(_) => MessageKind::Init,
            Self::Join(_) => MessageKind::Join,
            Self::CursorIn(_) => MessageKind::CursorIn,
            Self::CursorOut(_) => MessageKind::CursorOut,
            Self::Instruction(_) => MessageKind::Instruction,
            Self::TempDraw(_) => MessageKind::TempDraw,
            Self::ToggleLayerVisibility(_) => MessageKind::ToggleLayerVisibility,
            Self::Undo(_) => MessageKind::Undo,
            Self::Redo(_) => MessageKind::Redo,
            Self::AddLayer(_) => MessageKind::AddLayer,
            Self::LayerUp(_) => MessageKind::LayerUp,
            Self::LayerDown(_) => MessageKind::LayerDown,
        }
    }

    /// The layer a layer-scoped message targets.
    #[must_use]
    pub fn layer(&self) -> Option<&str> {
        match self {
            Self::Instruction(LayerInstruction { layer, .. })
            | Self::TempDraw(TempDraw { layer, .. })
            | Self::ToggleLayerVisibility(layer)
            | Self::Undo(layer)
            | Self::Redo(layer)
            | Self::AddLayer(layer)
            | Self::LayerUp(layer)
            | Self::LayerDown(layer) => Some(layer.as_str()),
            Self::RequestInit
            | Self::Init(_)
            | Self::Join(_)
            | Self::CursorIn(_)
            | Self::CursorOut(_) => None,
        }
    }
}
