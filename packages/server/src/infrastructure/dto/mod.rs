//! Data Transfer Objects (DTOs)
//!
//! DTOs are organized by protocol:
//! - `websocket`: opcode envelope and per-operation payloads
//! - `http`: HTTP API response DTOs
//! - `conversion`: domain entity → DTO conversions

pub mod conversion;
pub mod http;
pub mod websocket;
