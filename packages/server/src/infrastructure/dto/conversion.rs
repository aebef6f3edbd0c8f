//! Conversion logic from domain entities to DTOs.

use crate::domain::{DialogMsg, Room, RoomId, Step};
use crate::infrastructure::dto::{http, websocket as dto};

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            host: room.host.player.name.clone(),
            challenger: room.challenger.as_ref().map(|c| c.player.name.clone()),
            spectators: room.spectators.len(),
            started: room.started,
        }
    }
}

impl From<(RoomId, Step)> for dto::StepDto {
    fn from((rid, step): (RoomId, Step)) -> Self {
        Self {
            rid,
            i: step.i,
            j: step.j,
        }
    }
}

impl From<(RoomId, DialogMsg)> for dto::RoomChatDto {
    fn from((rid, msg): (RoomId, DialogMsg)) -> Self {
        Self { rid, msg }
    }
}
