//! Fastest-clicker game server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin clickrush-server
//! cargo run --bin clickrush-server -- --host 0.0.0.0 --port 3000
//! PORT=3000 cargo run --bin clickrush-server
//! ```

use std::{num::NonZeroUsize, time::Duration};

use clap::Parser;
use clickrush_server::{
    config::{DEFAULT_COUNTDOWN_SECS, DEFAULT_OUTBOUND_BUFFER, GameConfig},
    ui::{AppState, Server},
};
use clickrush_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "clickrush-server")]
#[command(about = "Fastest-clicker game server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Length of a round in seconds
    #[arg(long, default_value_t = DEFAULT_COUNTDOWN_SECS)]
    countdown_secs: u32,

    /// Messages a connection may lag behind before it is dropped
    #[arg(long, default_value_t = NonZeroUsize::new(DEFAULT_OUTBOUND_BUFFER).unwrap_or(NonZeroUsize::MIN))]
    outbound_buffer: NonZeroUsize,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            countdown_secs: self.countdown_secs,
            tick_interval: Duration::from_secs(1),
            outbound_buffer: self.outbound_buffer.get(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = args.game_config();
    tracing::debug!("Starting with {:?}", config);

    let server = Server::new(AppState::in_memory(&config));
    if let Err(e) = server.run(&args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
