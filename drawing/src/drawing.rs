//! The layered drawing and its document operations.
//!
//! DESIGN
//! ======
//! Layers are kept in an insertion-ordered map so iteration is deterministic,
//! but paint order is decided by `layer_order` alone. `layer_order` is always a
//! permutation of the map's keys: every operation validates before it mutates,
//! so a failed call leaves the drawing exactly as it was.

#[cfg(test)]
#[path = "drawing_test.rs"]
mod drawing_test;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::DrawingError;
use crate::instruction::InstructionBox;
use crate::layer::Layer;

/// Default canvas width in document units.
pub const DEFAULT_WIDTH: u32 = 1920;
/// Default canvas height in document units.
pub const DEFAULT_HEIGHT: u32 = 1080;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    width: u32,
    height: u32,
    layers: IndexMap<String, Layer>,
    layer_order: Vec<String>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Drawing {
    /// An empty drawing with no layers.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, layers: IndexMap::new(), layer_order: Vec::new() }
    }

    /// Hydrate a drawing from snapshot parts.
    ///
    /// # Errors
    ///
    /// Returns [`DrawingError::InconsistentLayerOrder`] unless `layer_order`
    /// names every layer exactly once.
    pub fn from_parts(
        width: u32,
        height: u32,
        layers: IndexMap<String, Layer>,
        layer_order: Vec<String>,
    ) -> Result<Self, DrawingError> {
        let is_permutation = layer_order.len() == layers.len()
            && layer_order.iter().all(|name| layers.contains_key(name))
            && layer_order.iter().enumerate().all(|(i, name)| !layer_order[..i].contains(name));
        if !is_permutation {
            return Err(DrawingError::InconsistentLayerOrder);
        }
        Ok(Self { width, height, layers, layer_order })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn layers(&self) -> &IndexMap<String, Layer> {
        &self.layers
    }

    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Layer names back to front.
    #[must_use]
    pub fn layer_order(&self) -> &[String] {
        &self.layer_order
    }

    /// Visible layers in paint order, back to front.
    pub fn paint_order(&self) -> impl Iterator<Item = (&str, &Layer)> {
        self.layer_order.iter().filter_map(|name| {
            self.layers
                .get(name)
                .filter(|layer| layer.is_visible())
                .map(|layer| (name.as_str(), layer))
        })
    }

    /// Append a new empty, visible layer on top.
    ///
    /// # Errors
    ///
    /// [`DrawingError::DuplicateLayer`] if the name is taken.
    pub fn add_layer(&mut self, name: &str) -> Result<(), DrawingError> {
        if self.layers.contains_key(name) {
            return Err(DrawingError::DuplicateLayer(name.to_owned()));
        }
        self.layers.insert(name.to_owned(), Layer::new());
        self.layer_order.push(name.to_owned());
        Ok(())
    }

    /// Swap the layer with its neighbor toward the end of the order.
    ///
    /// # Errors
    ///
    /// [`DrawingError::LayerNotFound`], or [`DrawingError::CannotMoveUp`]
    /// when the layer is already last.
    pub fn layer_up(&mut self, name: &str) -> Result<(), DrawingError> {
        let index = self.position(name)?;
        if index + 1 == self.layer_order.len() {
            return Err(DrawingError::CannotMoveUp(name.to_owned()));
        }
        self.layer_order.swap(index, index + 1);
        Ok(())
    }

    /// Swap the layer with its neighbor toward the start of the order.
    ///
    /// # Errors
    ///
    /// [`DrawingError::LayerNotFound`], or [`DrawingError::CannotMoveDown`]
    /// when the layer is already first.
    pub fn layer_down(&mut self, name: &str) -> Result<(), DrawingError> {
        let index = self.position(name)?;
        if index == 0 {
            return Err(DrawingError::CannotMoveDown(name.to_owned()));
        }
        self.layer_order.swap(index, index - 1);
        Ok(())
    }

    /// # Errors
    ///
    /// [`DrawingError::LayerNotFound`].
    pub fn toggle_layer_visibility(&mut self, name: &str) -> Result<(), DrawingError> {
        self.layer_mut(name)?.toggle_visibility();
        Ok(())
    }

    /// Step the layer's history cursor back by one.
    ///
    /// # Errors
    ///
    /// [`DrawingError::LayerNotFound`] or [`DrawingError::NothingToUndo`].
    pub fn undo(&mut self, name: &str) -> Result<(), DrawingError> {
        self.layer_mut(name)?.undo(name)
    }

    /// Step the layer's history cursor forward by one.
    ///
    /// # Errors
    ///
    /// [`DrawingError::LayerNotFound`] or [`DrawingError::NothingToRedo`].
    pub fn redo(&mut self, name: &str) -> Result<(), DrawingError> {
        self.layer_mut(name)?.redo(name)
    }

    /// Commit an instruction to a layer, discarding any undone tail first.
    ///
    /// # Errors
    ///
    /// [`DrawingError::LayerNotFound`] or [`DrawingError::EmptyStroke`].
    pub fn append_instruction(
        &mut self,
        name: &str,
        instruction: InstructionBox,
    ) -> Result<(), DrawingError> {
        self.layer_mut(name)?.append(instruction)
    }

    fn position(&self, name: &str) -> Result<usize, DrawingError> {
        self.layer_order
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| DrawingError::LayerNotFound(name.to_owned()))
    }

    fn layer_mut(&mut self, name: &str) -> Result<&mut Layer, DrawingError> {
        self.layers.get_mut(name).ok_or_else(|| DrawingError::LayerNotFound(name.to_owned()))
    }
}
