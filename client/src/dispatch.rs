//! Per-kind handler registry for inbound messages.
//!
//! DESIGN
//! ======
//! Handlers for a kind run synchronously in registration order. Each dispatch
//! pass works on a snapshot of the handler list taken before the first call,
//! so a handler may register or unregister (itself included) without
//! affecting the pass in progress and without deadlocking on the registry.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use frames::{CursorOut, Init, LayerInstruction, Message, MessageKind, TempDraw};

/// Handle returned by [`Dispatcher::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Arc<dyn Fn(&Message) + Send + Sync>;

#[derive(Default)]
pub struct Dispatcher {
    handlers: Mutex<HashMap<MessageKind, Vec<(HandlerId, Handler)>>>,
    next_id: AtomicU64,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let count: usize = handlers.values().map(Vec::len).sum();
        f.debug_struct("Dispatcher").field("handlers", &count).finish()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler that receives whole messages of one kind.
    pub fn register(
        &self,
        kind: MessageKind,
        handler: impl Fn(&Message) + Send + Sync + 'static,
    ) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        handlers.entry(kind).or_default().push((id, Arc::new(handler)));
        id
    }

    /// Returns `false` if no handler has this id.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        for list in handlers.values_mut() {
            if let Some(index) = list.iter().position(|(existing, _)| *existing == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Run every handler registered for the message's kind. Returns how many
    /// ran.
    pub fn dispatch(&self, message: &Message) -> usize {
        let snapshot: Vec<Handler> = {
            let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
            handlers
                .get(&message.kind())
                .map(|list| list.iter().map(|(_, handler)| Arc::clone(handler)).collect())
                .unwrap_or_default()
        };
        for handler in &snapshot {
            handler(message);
        }
        snapshot.len()
    }

    // =========================================================================
    // Typed registration
    // =========================================================================

    pub fn on_init(&self, handler: impl Fn(&Init) + Send + Sync + 'static) -> HandlerId {
        self.register(MessageKind::Init, move |message| {
            if let Message::Init(init) = message {
                handler(init);
            }
        })
    }

    pub fn on_join(&self, handler: impl Fn(&str) + Send + Sync + 'static) -> HandlerId {
        self.register(MessageKind::Join, move |message| {
            if let Message::Join(username) = message {
                handler(username.as_str());
            }
        })
    }

    pub fn on_cursor_out(&self, handler: impl Fn(&CursorOut) + Send + Sync + 'static) -> HandlerId {
        self.register(MessageKind::CursorOut, move |message| {
            if let Message::CursorOut(out) = message {
                handler(out);
            }
        })
    }

    pub fn on_instruction(
        &self,
        handler: impl Fn(&LayerInstruction) + Send + Sync + 'static,
    ) -> HandlerId {
        self.register(MessageKind::Instruction, move |message| {
            if let Message::Instruction(data) = message {
                handler(data);
            }
        })
    }

    pub fn on_temp_draw(&self, handler: impl Fn(&TempDraw) + Send + Sync + 'static) -> HandlerId {
        self.register(MessageKind::TempDraw, move |message| {
            if let Message::TempDraw(temp) = message {
                handler(temp);
            }
        })
    }

    pub fn on_toggle_layer_visibility(
        &self,
        handler: impl Fn(&str) + Send + Sync + 'static,
    ) -> HandlerId {
        self.on_layer_command(MessageKind::ToggleLayerVisibility, handler)
    }

    pub fn on_undo(&self, handler: impl Fn(&str) + Send + Sync + 'static) -> HandlerId {
        self.on_layer_command(MessageKind::Undo, handler)
    }

    pub fn on_redo(&self, handler: impl Fn(&str) + Send + Sync + 'static) -> HandlerId {
        self.on_layer_command(MessageKind::Redo, handler)
    }

    pub fn on_add_layer(&self, handler: impl Fn(&str) + Send + Sync + 'static) -> HandlerId {
        self.on_layer_command(MessageKind::AddLayer, handler)
    }

    pub fn on_layer_up(&self, handler: impl Fn(&str) + Send + Sync + 'static) -> HandlerId {
        self.on_layer_command(MessageKind::LayerUp, handler)
    }

    pub fn on_layer_down(&self, handler: impl Fn(&str) + Send + Sync + 'static) -> HandlerId {
        self.on_layer_command(MessageKind::LayerDown, handler)
    }

    fn on_layer_command(
        &self,
        kind: MessageKind,
        handler: impl Fn(&str) + Send + Sync + 'static,
    ) -> HandlerId {
        self.register(kind, move |message| {
            if let Some(layer) = message.layer() {
                handler(layer);
            }
        })
    }
}
