//! Gomoku match server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin gomoku-server
//! cargo run --bin gomoku-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use gomoku_server::{
    infrastructure::{
        kv::InMemoryKeyValueStore,
        message_pusher::WebSocketMessagePusher,
        repository::{KvHallRepository, KvPlayerRepository, KvRoomRepository},
    },
    ui::{AppState, Server},
};
use gomoku_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "gomoku-server")]
#[command(about = "Real-time five-in-a-row match server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(short = 'l', long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Key-value store and repositories
    // 2. MessagePusher
    // 3. AppState (lock registry and usecases)
    // 4. Server

    // 1. Create the store (in-memory)
    let store = Arc::new(InMemoryKeyValueStore::new());
    let rooms = Arc::new(KvRoomRepository::new(store.clone()));
    let players = Arc::new(KvPlayerRepository::new(store.clone()));
    let hall = Arc::new(KvHallRepository::new(store));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Wire usecases
    let state = AppState::new(
        rooms,
        players,
        hall,
        message_pusher,
        Arc::new(SystemClock),
    );

    // 4. Create and run the server
    if let Err(e) = Server::new(state).run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
