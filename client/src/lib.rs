//! Client side of a shared drawing session.
//!
//! A [`Connection`] keeps one WebSocket open to `<server>/ws/<username>`,
//! reconnecting after every loss and asking for a fresh snapshot each time it
//! opens. Inbound messages go through a [`Dispatcher`] to whoever registered
//! for their kind; [`attach`] wires a [`Session`] so the local document and
//! presence follow the server.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Server url, username and reconnect policy |
//! | [`lifecycle`] | Connection state machine and reconnect scheduling |
//! | [`connection`] | Socket task, outbound API and state watch |
//! | [`dispatch`] | Per-kind handler registry for inbound messages |
//! | [`session`] | Document, presence and previews kept in sync |
//! | [`presence`] | Local pointer, brush, zoom and remote cursors |
//! | [`preview`] | Live stroke previews that never enter history |

pub mod config;
pub mod connection;
pub mod dispatch;
pub mod lifecycle;
pub mod presence;
pub mod preview;
pub mod session;

pub use config::{ClientConfig, ConfigError, ReconnectPolicy};
pub use connection::Connection;
pub use dispatch::{Dispatcher, HandlerId};
pub use lifecycle::ConnectionState;
pub use presence::Presence;
pub use preview::{Preview, Previews};
pub use session::{Outbound, Session, attach};
