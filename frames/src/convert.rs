//! Translation between client values and wire shapes.
//!
//! Decoding validates what the client model relies on: strokes carry at least
//! one point, brush widths are positive, inserted images are placed, and a
//! drawing's order names each layer once with every history cursor in range. Encoding applies the same
//! checks so nothing the server would reject leaves the client.

use drawing::{
    Brush, BrushShape, Drawing, HexColor, Instruction, InstructionBox, Layer, Stroke,
};
use indexmap::IndexMap;

use crate::CodecError;
use crate::message::{Cursor, CursorOut, Init, LayerInstruction, Message, TempDraw};
use crate::wire::*;

// =============================================================================
// Client -> wire
// =============================================================================

pub(crate) fn message_to_wire(message: &Message) -> Result<WireMessage, CodecError> {
    Ok(match message {
        Message::RequestInit => WireMessage::RequestInit,
        Message::Init(init) => WireMessage::Init(WireInit {
            drawing: drawing_to_wire(&init.drawing)?,
            users: init.users.clone(),
        }),
        Message::Join(username) => WireMessage::Join(username.clone()),
        Message::CursorIn(cursor) => {
            WireMessage::CursorIn(cursor.as_ref().map(cursor_to_wire).transpose()?)
        }
        Message::CursorOut(out) => WireMessage::CursorOut(WireCursorOut {
            cursor: out.cursor.as_ref().map(cursor_to_wire).transpose()?,
            username: out.username.clone(),
        }),
        Message::Instruction(data) => WireMessage::Instruction(WireLayerInstruction {
            layer: data.layer.clone(),
            instruction: instruction_box_to_wire(&data.instruction)?,
        }),
        Message::TempDraw(temp) => WireMessage::TempDraw(WireTempDraw {
            brush: brush_to_wire(&temp.brush)?,
            uuid: temp.uuid.clone(),
            start: temp.start,
            end: temp.end,
            layer: temp.layer.clone(),
        }),
        Message::ToggleLayerVisibility(layer) => WireMessage::ToggleLayerVisibility(layer.clone()),
        Message::Undo(layer) => WireMessage::Undo(layer.clone()),
        Message::Redo(layer) => WireMessage::Redo(layer.clone()),
        Message::AddLayer(layer) => WireMessage::AddLayer(layer.clone()),
        Message::LayerUp(layer) => WireMessage::LayerUp(layer.clone()),
        Message::LayerDown(layer) => WireMessage::LayerDown(layer.clone()),
    })
}

pub(crate) fn color_to_wire(color: &HexColor) -> WireColor {
    let [r, g, b, a] = color.channels();
    WireColor { r, g, b, a }
}

fn shape_to_wire(shape: &BrushShape) -> WireBrushShape {
    match shape {
        BrushShape::Circle => WireBrushShape::Circle,
        BrushShape::Square => WireBrushShape::Square,
        BrushShape::Custom { polygons } => WireBrushShape::Custom { points: polygons.clone() },
    }
}

fn brush_to_wire(brush: &Brush) -> Result<WireBrush, CodecError> {
    if !brush.has_valid_width() {
        return Err(CodecError::InvalidBrushWidth(brush.width));
    }
    Ok(WireBrush {
        brush_shape: shape_to_wire(&brush.brush_shape),
        color: color_to_wire(&brush.color),
        width: brush.width,
        diffusion: brush.diffusion,
        erase: brush.erase,
    })
}

fn cursor_to_wire(cursor: &Cursor) -> Result<WireCursor, CodecError> {
    Ok(WireCursor { point: cursor.point, brush: brush_to_wire(&cursor.brush)? })
}

fn instruction_to_wire(instruction: &Instruction) -> Result<WireInstruction, CodecError> {
    Ok(match instruction {
        Instruction::Stroke(stroke) => {
            if stroke.points.is_empty() {
                return Err(CodecError::EmptyStroke);
            }
            WireInstruction::Stroke(WireStroke {
                points: stroke.points.clone(),
                brush: brush_to_wire(&stroke.brush)?,
            })
        }
        Instruction::Motion(motion) => WireInstruction::Motion(motion.clone()),
        Instruction::ImageInsertion(image) => {
            if image.position.is_none() {
                return Err(CodecError::MissingImagePosition);
            }
            WireInstruction::ImageInsertion(image.clone())
        }
    })
}

fn instruction_box_to_wire(boxed: &InstructionBox) -> Result<WireInstructionBox, CodecError> {
    Ok(WireInstructionBox {
        instruction: instruction_to_wire(&boxed.instruction)?,
        uuid: boxed.uuid.clone(),
    })
}

fn drawing_to_wire(drawing: &Drawing) -> Result<WireDrawing, CodecError> {
    let mut layers = IndexMap::with_capacity(drawing.layers().len());
    for (name, layer) in drawing.layers() {
        let history = layer
            .history()
            .iter()
            .map(instruction_box_to_wire)
            .collect::<Result<Vec<_>, _>>()?;
        layers.insert(
            name.clone(),
            WireLayer { history, history_index: layer.history_index(), visible: layer.is_visible() },
        );
    }
    Ok(WireDrawing {
        width: drawing.width(),
        height: drawing.height(),
        layers,
        layer_order: drawing.layer_order().to_vec(),
    })
}

// =============================================================================
// Wire -> client
// =============================================================================

pub(crate) fn message_from_wire(wire: WireMessage) -> Result<Message, CodecError> {
    Ok(match wire {
        WireMessage::RequestInit => Message::RequestInit,
        WireMessage::Init(init) => Message::Init(Init {
            drawing: drawing_from_wire(init.drawing)?,
            users: init.users,
        }),
        WireMessage::Join(username) => Message::Join(username),
        WireMessage::CursorIn(cursor) => {
            Message::CursorIn(cursor.map(cursor_from_wire).transpose()?)
        }
        WireMessage::CursorOut(out) => Message::CursorOut(CursorOut {
            cursor: out.cursor.map(cursor_from_wire).transpose()?,
            username: out.username,
        }),
        WireMessage::Instruction(data) => Message::Instruction(LayerInstruction {
            layer: data.layer,
            instruction: instruction_box_from_wire(data.instruction)?,
        }),
        WireMessage::TempDraw(temp) => Message::TempDraw(TempDraw {
            brush: brush_from_wire(temp.brush)?,
            uuid: temp.uuid,
            start: temp.start,
            end: temp.end,
            layer: temp.layer,
        }),
        WireMessage::ToggleLayerVisibility(layer) => Message::ToggleLayerVisibility(layer),
        WireMessage::Undo(layer) => Message::Undo(layer),
        WireMessage::Redo(layer) => Message::Redo(layer),
        WireMessage::AddLayer(layer) => Message::AddLayer(layer),
        WireMessage::LayerUp(layer) => Message::LayerUp(layer),
        WireMessage::LayerDown(layer) => Message::LayerDown(layer),
    })
}

pub(crate) fn color_from_wire(color: WireColor) -> HexColor {
    HexColor::from_rgba(color.r, color.g, color.b, color.a)
}

fn shape_from_wire(shape: WireBrushShape) -> BrushShape {
    match shape {
        WireBrushShape::Circle => BrushShape::Circle,
        WireBrushShape::Square => BrushShape::Square,
        WireBrushShape::Custom { points } => BrushShape::Custom { polygons: points },
    }
}

fn brush_from_wire(wire: WireBrush) -> Result<Brush, CodecError> {
    let brush = Brush {
        brush_shape: shape_from_wire(wire.brush_shape),
        color: color_from_wire(wire.color),
        width: wire.width,
        diffusion: wire.diffusion,
        erase: wire.erase,
    };
    if !brush.has_valid_width() {
        return Err(CodecError::InvalidBrushWidth(brush.width));
    }
    Ok(brush)
}

fn cursor_from_wire(wire: WireCursor) -> Result<Cursor, CodecError> {
    Ok(Cursor { point: wire.point, brush: brush_from_wire(wire.brush)? })
}

fn instruction_from_wire(wire: WireInstruction) -> Result<Instruction, CodecError> {
    Ok(match wire {
        WireInstruction::Stroke(stroke) => {
            if stroke.points.is_empty() {
                return Err(CodecError::EmptyStroke);
            }
            Instruction::Stroke(Stroke {
                points: stroke.points,
                brush: brush_from_wire(stroke.brush)?,
            })
        }
        WireInstruction::Motion(motion) => Instruction::Motion(motion),
        WireInstruction::ImageInsertion(image) => {
            if image.position.is_none() {
                return Err(CodecError::MissingImagePosition);
            }
            Instruction::ImageInsertion(image)
        }
    })
}

fn instruction_box_from_wire(wire: WireInstructionBox) -> Result<InstructionBox, CodecError> {
    Ok(InstructionBox::with_uuid(instruction_from_wire(wire.instruction)?, wire.uuid))
}

fn layer_from_wire(name: &str, wire: WireLayer) -> Result<Layer, CodecError> {
    if wire.history_index > wire.history.len() {
        return Err(CodecError::InconsistentDrawing(format!(
            "layer {name:?} has history_index {} past {} entries",
            wire.history_index,
            wire.history.len()
        )));
    }
    let history = wire
        .history
        .into_iter()
        .map(instruction_box_from_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Layer::from_parts(history, wire.history_index, wire.visible))
}

fn drawing_from_wire(wire: WireDrawing) -> Result<Drawing, CodecError> {
    let mut layers = IndexMap::with_capacity(wire.layers.len());
    for (name, layer) in wire.layers {
        let layer = layer_from_wire(&name, layer)?;
        layers.insert(name, layer);
    }
    Drawing::from_parts(wire.width, wire.height, layers, wire.layer_order)
        .map_err(|e| CodecError::InconsistentDrawing(e.to_string()))
}
