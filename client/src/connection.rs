//! The socket task and the handle applications talk to.
//!
//! DESIGN
//! ======
//! One tokio task owns the WebSocket for the whole life of a [`Connection`],
//! across reconnects. Callers never touch the socket: outbound text goes
//! through an unbounded channel and the current [`ConnectionState`] is
//! published on a watch channel.
//!
//! Sends are best effort. While the socket is not open a message is dropped
//! with a warning instead of being queued, and anything that slipped into the
//! channel before a reconnect is discarded so `RequestInit` is always the
//! first frame on a fresh socket. The `Init` that answers it replaces local
//! state, so nothing sent while offline would survive anyway.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error to the caller. Malformed inbound frames are
//! logged and dropped; socket errors end the current connection and schedule
//! exactly one reconnect.

use std::sync::Arc;

use drawing::{Brush, InstructionBox, Point};
use frames::{Cursor, LayerInstruction, Message, TempDraw, decode_message, encode_message};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, ReconnectPolicy};
use crate::dispatch::Dispatcher;
use crate::lifecycle::{ConnectionState, Lifecycle};
use crate::session::Outbound;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug)]
enum Command {
    Send(String),
    Shutdown,
}

enum Exit {
    Closed,
    Shutdown,
}

#[derive(Debug)]
pub struct Connection {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ConnectionState>,
    task: JoinHandle<()>,
}

impl Connection {
    /// Start connecting in the background. Inbound messages are handed to
    /// `dispatcher` on the socket task, in arrival order.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(config: &ClientConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(ConnectionState::Connecting);
        let task = tokio::spawn(run(config.endpoint(), config.reconnect, dispatcher, receiver, state_tx));
        Self { commands, state, task }
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// A receiver that observes every state change.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Tear the connection down and cancel any pending reconnect.
    pub fn close(&self) {
        if self.commands.send(Command::Shutdown).is_err() {
            debug!("connection task already stopped");
        }
    }

    /// Close and wait for the socket task to finish.
    pub async fn shutdown(self) {
        self.close();
        if let Err(error) = self.task.await {
            warn!(%error, "connection task ended abnormally");
        }
    }

    /// Encode and send one message if the socket is open.
    pub fn send(&self, message: &Message) {
        let kind = message.kind().event_name();
        if !self.is_open() {
            warn!(kind, state = %self.state(), "not connected; dropping message");
            return;
        }
        let text = match encode_message(message) {
            Ok(text) => text,
            Err(error) => {
                warn!(kind, %error, "could not encode message");
                return;
            }
        };
        if self.commands.send(Command::Send(text)).is_err() {
            warn!(kind, "connection task stopped; dropping message");
        }
    }

    // =========================================================================
    // Outbound API
    // =========================================================================

    pub fn undo(&self, layer: &str) {
        self.send(&Message::Undo(layer.to_owned()));
    }

    pub fn redo(&self, layer: &str) {
        self.send(&Message::Redo(layer.to_owned()));
    }

    pub fn add_layer(&self, layer: &str) {
        self.send(&Message::AddLayer(layer.to_owned()));
    }

    /// Share the local pointer. `None` means it left the canvas.
    pub fn cursor(&self, brush: &Brush, point: Option<Point>) {
        let cursor = point.map(|point| Cursor { point, brush: brush.clone() });
        self.send(&Message::CursorIn(cursor));
    }

    pub fn instruction_box(&self, instruction: &InstructionBox, layer: &str) {
        self.send(&Message::Instruction(LayerInstruction {
            layer: layer.to_owned(),
            instruction: instruction.clone(),
        }));
    }

    pub fn toggle_layer_visibility(&self, layer: &str) {
        self.send(&Message::ToggleLayerVisibility(layer.to_owned()));
    }

    pub fn layer_up(&self, layer: &str) {
        self.send(&Message::LayerUp(layer.to_owned()));
    }

    pub fn layer_down(&self, layer: &str) {
        self.send(&Message::LayerDown(layer.to_owned()));
    }

    pub fn draw_temp(&self, brush: &Brush, uuid: &str, start: Point, end: Point, layer: &str) {
        self.send(&Message::TempDraw(TempDraw {
            brush: brush.clone(),
            uuid: uuid.to_owned(),
            start,
            end,
            layer: layer.to_owned(),
        }));
    }
}

impl Outbound for Connection {
    fn send(&self, message: &Message) {
        Connection::send(self, message);
    }
}

// =============================================================================
// Socket task
// =============================================================================

async fn run(
    endpoint: String,
    policy: ReconnectPolicy,
    dispatcher: Arc<Dispatcher>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<ConnectionState>,
) {
    let mut lifecycle = Lifecycle::new(policy);
    loop {
        publish(&state, &lifecycle);
        let connected = tokio::select! {
            result = connect_async(endpoint.as_str()) => result,
            () = shutdown_requested(&mut commands) => break,
        };
        match connected {
            Ok((socket, _)) => {
                if discard_stale(&mut commands) {
                    break;
                }
                if let Some(request_init) = lifecycle.on_open() {
                    publish(&state, &lifecycle);
                    if let Exit::Shutdown = serve(socket, &request_init, &dispatcher, &mut commands).await {
                        break;
                    }
                }
            }
            Err(error) => warn!(%endpoint, %error, "connect failed"),
        }

        lifecycle.on_close();
        publish(&state, &lifecycle);
        let Some(delay) = lifecycle.schedule_reconnect() else {
            break;
        };
        publish(&state, &lifecycle);
        info!(?delay, "reconnect scheduled");
        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            () = shutdown_requested(&mut commands) => break,
        }
        if !lifecycle.on_retry() {
            break;
        }
    }
    lifecycle.stop();
    publish(&state, &lifecycle);
}

fn publish(state: &watch::Sender<ConnectionState>, lifecycle: &Lifecycle) {
    let next = lifecycle.state();
    let changed = state.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
    if changed {
        info!(state = %next, "connection state changed");
    }
}

/// Resolves once the handle asks to stop or is dropped. Sends arriving in the
/// meantime are dropped.
async fn shutdown_requested(commands: &mut mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::Send(_) => debug!("not connected; dropping queued message"),
            Command::Shutdown => return,
        }
    }
}

/// Drop whatever was queued before the socket opened. Returns `true` if a
/// shutdown was among it.
fn discard_stale(commands: &mut mpsc::UnboundedReceiver<Command>) -> bool {
    let mut dropped = 0_usize;
    loop {
        match commands.try_recv() {
            Ok(Command::Send(_)) => dropped += 1,
            Ok(Command::Shutdown) | Err(TryRecvError::Disconnected) => return true,
            Err(TryRecvError::Empty) => break,
        }
    }
    if dropped > 0 {
        warn!(dropped, "discarded messages queued while disconnected");
    }
    false
}

async fn serve(
    socket: Socket,
    request_init: &Message,
    dispatcher: &Dispatcher,
    commands: &mut mpsc::UnboundedReceiver<Command>,
) -> Exit {
    let (mut sink, mut source) = socket.split();

    match encode_message(request_init) {
        Ok(text) => {
            if let Err(error) = sink.send(WsMessage::Text(text.into())).await {
                warn!(%error, "could not request initial state");
                return Exit::Closed;
            }
        }
        Err(error) => warn!(%error, "could not encode resync request"),
    }

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Send(text)) => {
                    if let Err(error) = sink.send(WsMessage::Text(text.into())).await {
                        warn!(%error, "send failed");
                        return Exit::Closed;
                    }
                }
                Some(Command::Shutdown) | None => {
                    if let Err(error) = sink.send(WsMessage::Close(None)).await {
                        debug!(%error, "close frame not sent");
                    }
                    return Exit::Shutdown;
                }
            },
            frame = source.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => deliver(text.as_str(), dispatcher),
                Some(Ok(WsMessage::Binary(bytes))) => {
                    debug!(len = bytes.len(), "ignoring binary frame");
                }
                Some(Ok(WsMessage::Close(_))) | None => return Exit::Closed,
                // tungstenite answers pings itself on the next read
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    warn!(%error, "socket error");
                    return Exit::Closed;
                }
            },
        }
    }
}

fn deliver(text: &str, dispatcher: &Dispatcher) {
    match decode_message(text) {
        Ok(message) => {
            let handled = dispatcher.dispatch(&message);
            debug!(kind = message.kind().event_name(), handled, "frame received");
        }
        Err(error) => warn!(%error, "dropping malformed frame"),
    }
}
