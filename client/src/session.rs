//! The per-session context: document, presence and live previews.
//!
//! DESIGN
//! ======
//! Local edits are applied at once and then sent. The server relays every
//! document edit to all participants, the sender included, so each sent edit
//! is remembered as an expected echo; when an identical message comes back it
//! is consumed instead of being applied a second time. Messages that carry the
//! same edit are interchangeable, so it does not matter whether the consumed
//! copy was really ours.
//!
//! `Init` is authoritative. It replaces the drawing and the user list and
//! forgets previews and expected echoes, which also repairs any divergence
//! left by edits that crossed in flight.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use drawing::{Document, Drawing, DrawingError, InstructionBox, Point};
use frames::{Cursor, Init, LayerInstruction, Message, MessageKind, TempDraw};
use tracing::{debug, warn};

use crate::dispatch::{Dispatcher, HandlerId};
use crate::presence::Presence;
use crate::preview::Previews;

/// Oldest expected echoes are forgotten past this many.
const MAX_EXPECTED_ECHOES: usize = 256;

/// Where local edits are sent. Sending is best effort and never fails to the
/// caller.
pub trait Outbound {
    fn send(&self, message: &Message);
}

#[derive(Debug)]
pub struct Session {
    username: String,
    document: Document,
    presence: Presence,
    previews: Previews,
    expected_echoes: VecDeque<Message>,
}

impl Session {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            document: Document::default(),
            presence: Presence::default(),
            previews: Previews::default(),
            expected_echoes: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn drawing(&self) -> &Drawing {
        self.document.drawing()
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for subscribing to changes.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn presence_mut(&mut self) -> &mut Presence {
        &mut self.presence
    }

    #[must_use]
    pub fn previews(&self) -> &Previews {
        &self.previews
    }

    /// Local edits sent but not yet relayed back.
    #[must_use]
    pub fn pending_echoes(&self) -> usize {
        self.expected_echoes.len()
    }

    // =========================================================================
    // Inbound
    // =========================================================================

    /// Apply a message received from the server.
    ///
    /// # Errors
    ///
    /// Returns the [`DrawingError`] of a document edit that does not apply to
    /// the local drawing. The session is unchanged in that case.
    pub fn apply(&mut self, message: &Message) -> Result<(), DrawingError> {
        if self.consume_echo(message) {
            debug!(kind = message.kind().event_name(), "echo of local edit");
            return Ok(());
        }
        match message {
            Message::Init(init) => {
                self.resync(init);
                Ok(())
            }
            Message::Join(username) => {
                if username != &self.username {
                    self.presence.add_user(username);
                }
                Ok(())
            }
            Message::CursorOut(out) => {
                if out.username != self.username {
                    self.presence.update_cursor(&out.username, out.cursor.clone());
                }
                Ok(())
            }
            Message::Instruction(data) => {
                self.document.append_instruction(&data.layer, data.instruction.clone())?;
                self.previews.remove(&data.instruction.uuid);
                Ok(())
            }
            Message::TempDraw(temp) => {
                self.previews.push(temp);
                Ok(())
            }
            Message::ToggleLayerVisibility(layer) => self.document.toggle_layer_visibility(layer),
            Message::Undo(layer) => self.document.undo(layer),
            Message::Redo(layer) => self.document.redo(layer),
            Message::AddLayer(layer) => self.document.add_layer(layer),
            Message::LayerUp(layer) => self.document.layer_up(layer),
            Message::LayerDown(layer) => self.document.layer_down(layer),
            Message::RequestInit | Message::CursorIn(_) => {
                debug!(kind = message.kind().event_name(), "ignoring server-bound message");
                Ok(())
            }
        }
    }

    fn resync(&mut self, init: &Init) {
        self.document.replace(init.drawing.clone());
        self.presence.replace_users(&init.users, &self.username);
        self.previews.clear();
        self.expected_echoes.clear();

        let stale_selection = self
            .presence
            .selected_layer()
            .is_some_and(|layer| self.document.drawing().layer(layer).is_none());
        if stale_selection {
            self.presence.select_layer(None);
        }
    }

    fn consume_echo(&mut self, message: &Message) -> bool {
        match self.expected_echoes.iter().position(|expected| expected == message) {
            Some(index) => {
                self.expected_echoes.remove(index);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Local edits
    // =========================================================================

    /// # Errors
    ///
    /// See [`Document::add_layer`]. Nothing is sent on error.
    pub fn add_layer(&mut self, name: &str, out: &impl Outbound) -> Result<(), DrawingError> {
        self.document.add_layer(name)?;
        self.publish(Message::AddLayer(name.to_owned()), out);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Document::layer_up`]. Nothing is sent on error.
    pub fn layer_up(&mut self, name: &str, out: &impl Outbound) -> Result<(), DrawingError> {
        self.document.layer_up(name)?;
        self.publish(Message::LayerUp(name.to_owned()), out);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Document::layer_down`]. Nothing is sent on error.
    pub fn layer_down(&mut self, name: &str, out: &impl Outbound) -> Result<(), DrawingError> {
        self.document.layer_down(name)?;
        self.publish(Message::LayerDown(name.to_owned()), out);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Document::toggle_layer_visibility`]. Nothing is sent on error.
    pub fn toggle_layer_visibility(
        &mut self,
        name: &str,
        out: &impl Outbound,
    ) -> Result<(), DrawingError> {
        self.document.toggle_layer_visibility(name)?;
        self.publish(Message::ToggleLayerVisibility(name.to_owned()), out);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Document::undo`]. Nothing is sent on error.
    pub fn undo(&mut self, name: &str, out: &impl Outbound) -> Result<(), DrawingError> {
        self.document.undo(name)?;
        self.publish(Message::Undo(name.to_owned()), out);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Document::redo`]. Nothing is sent on error.
    pub fn redo(&mut self, name: &str, out: &impl Outbound) -> Result<(), DrawingError> {
        self.document.redo(name)?;
        self.publish(Message::Redo(name.to_owned()), out);
        Ok(())
    }

    /// Commit a finished instruction and drop its live preview.
    ///
    /// # Errors
    ///
    /// See [`Document::append_instruction`]. Nothing is sent on error.
    pub fn commit_instruction(
        &mut self,
        layer: &str,
        instruction: InstructionBox,
        out: &impl Outbound,
    ) -> Result<(), DrawingError> {
        self.document.append_instruction(layer, instruction.clone())?;
        self.previews.remove(&instruction.uuid);
        self.publish(
            Message::Instruction(LayerInstruction { layer: layer.to_owned(), instruction }),
            out,
        );
        Ok(())
    }

    /// Move the local pointer and share it with the current brush. `None`
    /// means the pointer left the canvas.
    pub fn move_cursor(&mut self, point: Option<Point>, out: &impl Outbound) {
        self.presence.set_cursor(point);
        let cursor = point.map(|point| Cursor { point, brush: self.presence.brush().clone() });
        out.send(&Message::CursorIn(cursor));
    }

    /// Share one segment of an in-progress stroke drawn with the current brush.
    pub fn draw_temp(
        &mut self,
        layer: &str,
        uuid: &str,
        start: Point,
        end: Point,
        out: &impl Outbound,
    ) {
        let temp = TempDraw {
            brush: self.presence.brush().clone(),
            uuid: uuid.to_owned(),
            start,
            end,
            layer: layer.to_owned(),
        };
        self.previews.push(&temp);
        out.send(&Message::TempDraw(temp));
    }

    fn publish(&mut self, message: Message, out: &impl Outbound) {
        out.send(&message);
        if self.expected_echoes.len() == MAX_EXPECTED_ECHOES {
            self.expected_echoes.pop_front();
        }
        self.expected_echoes.push_back(message);
    }
}

/// Keep `session` in sync with every inbound message kind.
///
/// Edits that do not apply locally are logged and skipped; the next `Init`
/// brings the drawing back in line.
pub fn attach(session: &Arc<Mutex<Session>>, dispatcher: &Dispatcher) -> Vec<HandlerId> {
    MessageKind::ALL
        .into_iter()
        .filter(|kind| !matches!(kind, MessageKind::RequestInit | MessageKind::CursorIn))
        .map(|kind| {
            let session = Arc::clone(session);
            dispatcher.register(kind, move |message| {
                let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
                if let Err(error) = session.apply(message) {
                    warn!(
                        kind = message.kind().event_name(),
                        layer = message.layer().unwrap_or_default(),
                        %error,
                        "remote edit does not apply"
                    );
                }
            })
        })
        .collect()
}
