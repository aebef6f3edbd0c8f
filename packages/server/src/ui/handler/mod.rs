//! Request handlers.

mod http;
mod websocket;

pub use http::{get_players, get_rooms, health_check};
pub use websocket::websocket_handler;
