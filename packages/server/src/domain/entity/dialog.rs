//! チャット履歴（ロビーとルームで共通）

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of chat messages kept per dialog. The oldest is evicted first.
pub const DIALOG_CAPACITY: usize = 10;

/// One chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogMsg {
    pub time: String,
    pub from: String,
    pub content: String,
}

impl DialogMsg {
    pub fn new(time: String, from: String, content: String) -> Self {
        Self {
            time,
            from,
            content,
        }
    }
}

/// Bounded chat history holding at most [`DIALOG_CAPACITY`] messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dialog(VecDeque<DialogMsg>);

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, evicting the oldest ones while over capacity.
    pub fn push(&mut self, msg: DialogMsg) {
        self.0.push_back(msg);
        while self.0.len() > DIALOG_CAPACITY {
            self.0.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &DialogMsg> {
        self.0.iter()
    }
}
