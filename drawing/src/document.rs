//! Observable wrapper around a [`Drawing`].
//!
//! DESIGN
//! ======
//! The drawing itself is a plain aggregate. `Document` forwards each operation
//! to it and, only when the operation succeeds, tells every subscriber what
//! changed before returning. Subscribers see the updated drawing alongside the
//! change so a renderer can refresh without holding its own copy.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::fmt;

use crate::drawing::Drawing;
use crate::error::DrawingError;
use crate::instruction::InstructionBox;

/// What a successful operation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    LayerAdded(String),
    LayerMovedUp(String),
    LayerMovedDown(String),
    VisibilityToggled(String),
    Undone(String),
    Redone(String),
    InstructionAppended { layer: String, uuid: String },
    /// The whole drawing was swapped, e.g. after a resync.
    Replaced,
}

/// Handle returned by [`Document::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Change, &Drawing) + Send>;

#[derive(Default)]
pub struct Document {
    drawing: Drawing,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("drawing", &self.drawing)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Document {
    #[must_use]
    pub fn new(drawing: Drawing) -> Self {
        Self { drawing, observers: Vec::new(), next_id: 0 }
    }

    #[must_use]
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&Change, &Drawing) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Swap in an authoritative drawing, discarding local state.
    pub fn replace(&mut self, drawing: Drawing) {
        self.drawing = drawing;
        self.notify(&Change::Replaced);
    }

    /// # Errors
    ///
    /// See [`Drawing::add_layer`].
    pub fn add_layer(&mut self, name: &str) -> Result<(), DrawingError> {
        self.drawing.add_layer(name)?;
        self.notify(&Change::LayerAdded(name.to_owned()));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Drawing::layer_up`].
    pub fn layer_up(&mut self, name: &str) -> Result<(), DrawingError> {
        self.drawing.layer_up(name)?;
        self.notify(&Change::LayerMovedUp(name.to_owned()));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Drawing::layer_down`].
    pub fn layer_down(&mut self, name: &str) -> Result<(), DrawingError> {
        self.drawing.layer_down(name)?;
        self.notify(&Change::LayerMovedDown(name.to_owned()));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Drawing::toggle_layer_visibility`].
    pub fn toggle_layer_visibility(&mut self, name: &str) -> Result<(), DrawingError> {
        self.drawing.toggle_layer_visibility(name)?;
        self.notify(&Change::VisibilityToggled(name.to_owned()));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Drawing::undo`].
    pub fn undo(&mut self, name: &str) -> Result<(), DrawingError> {
        self.drawing.undo(name)?;
        self.notify(&Change::Undone(name.to_owned()));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Drawing::redo`].
    pub fn redo(&mut self, name: &str) -> Result<(), DrawingError> {
        self.drawing.redo(name)?;
        self.notify(&Change::Redone(name.to_owned()));
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Drawing::append_instruction`].
    pub fn append_instruction(
        &mut self,
        name: &str,
        instruction: InstructionBox,
    ) -> Result<(), DrawingError> {
        let uuid = instruction.uuid.clone();
        self.drawing.append_instruction(name, instruction)?;
        self.notify(&Change::InstructionAppended { layer: name.to_owned(), uuid });
        Ok(())
    }

    fn notify(&mut self, change: &Change) {
        for (_, observer) in &mut self.observers {
            observer(change, &self.drawing);
        }
    }
}
