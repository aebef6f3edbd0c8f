//! UI 層
//!
//! WebSocket / HTTP の受け口、受信メッセージのディスパッチ、通知の配信。

mod error;
mod handler;
mod notifier;
mod router;
mod server;
mod signal;
mod state;

pub use error::DispatchError;
pub use notifier::Notifier;
pub use server::Server;
pub use state::AppState;
