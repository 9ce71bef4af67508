//! A single layer: its instruction history and undo cursor.
//!
//! DESIGN
//! ======
//! `history_index` splits `history` in two. Entries before it are active and
//! rendered; entries from it onward were undone but are kept so redo can bring
//! them back. Appending while an undone tail exists discards that tail.

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use serde::Serialize;

use crate::error::DrawingError;
use crate::instruction::InstructionBox;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    history: Vec<InstructionBox>,
    history_index: usize,
    visible: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self { history: Vec::new(), history_index: 0, visible: true }
    }
}

impl Layer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a layer from snapshot parts. The index is clamped to the
    /// history length.
    #[must_use]
    pub fn from_parts(history: Vec<InstructionBox>, history_index: usize, visible: bool) -> Self {
        let history_index = history_index.min(history.len());
        Self { history, history_index, visible }
    }

    #[must_use]
    pub fn history(&self) -> &[InstructionBox] {
        &self.history
    }

    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history_index
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Instructions that are currently rendered.
    #[must_use]
    pub fn active(&self) -> &[InstructionBox] {
        &self.history[..self.history_index]
    }

    /// Instructions that were undone and can be redone.
    #[must_use]
    pub fn undone(&self) -> &[InstructionBox] {
        &self.history[self.history_index..]
    }

    pub(crate) fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub(crate) fn undo(&mut self, name: &str) -> Result<(), DrawingError> {
        if self.history_index == 0 {
            return Err(DrawingError::NothingToUndo(name.to_owned()));
        }
        self.history_index -= 1;
        Ok(())
    }

    pub(crate) fn redo(&mut self, name: &str) -> Result<(), DrawingError> {
        if self.history_index == self.history.len() {
            return Err(DrawingError::NothingToRedo(name.to_owned()));
        }
        self.history_index += 1;
        Ok(())
    }

    pub(crate) fn append(&mut self, instruction: InstructionBox) -> Result<(), DrawingError> {
        instruction.instruction.validate()?;
        self.history.truncate(self.history_index);
        self.history.push(instruction);
        self.history_index = self.history.len();
        Ok(())
    }
}
