//! Parley CLI client with reconnection support.
//!
//! Connects to a Parley server, waits to be matched with a stranger and sends
//! each typed line as a chat message. Type `/quit` to leave.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval)
//! and rejoins matchmaking on every new connection.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parley-client -- --name Alice
//! cargo run --bin parley-client -- -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use parley_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parley-client")]
#[command(about = "CLI client for anonymous one-to-one chat", long_about = None)]
struct Args {
    /// Display name shown to the peer (defaults to "Anonymous")
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = parley_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
