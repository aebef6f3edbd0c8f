//! Real-time five-in-a-row match server.
//!
//! Players connect over WebSocket, chat in a shared hall, create or join
//! rooms as host, challenger or spectator, and play on a 15x15 board.
//! Room, player and hall state lives in a key-value store; this process keeps
//! only the per-room locks and the live sessions.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
