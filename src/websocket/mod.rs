//! WebSocket layer
//!
//! Real-time streaming of request telemetry to connected dashboards:
//! connection hub, wire messages, and the axum upgrade handler.

pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage, WsEvent};
