//! Parley matchmaking and signaling relay server.
//!
//! Pairs anonymous visitors one-to-one and relays chat and WebRTC signaling
//! between the two members of each room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parley-server
//! cargo run --bin parley-server -- --host 0.0.0.0 --port 3000 --requeue-delay-ms 5000
//! ```

use std::time::Duration;

use clap::Parser;
use parley_server::ui::{Server, ServerConfig};
use parley_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parley-server")]
#[command(about = "Anonymous peer matchmaking and signaling relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Delay before a peer whose partner left is put back into matchmaking
    #[arg(long, default_value = "2000")]
    requeue_delay_ms: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            requeue_delay: Duration::from_millis(args.requeue_delay_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let server = Server::new(ServerConfig::from(args));
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
