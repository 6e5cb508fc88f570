//! Interactive terminal client for the Dashka translation relay.
//!
//! Each typed line is translated through `POST /translate` and shared with the
//! room over WebSocket. Reconnects up to 5 times at 5 second intervals; a
//! handshake rejected with an HTTP 4xx status exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin dashka-client -- --username Dad --room FAMILY1 --from RU --to DE
//! cargo run --bin dashka-client -- -n Kid -r FAMILY1 --from DE --to RU
//! ```

use clap::Parser;

use dashka_client::SessionOptions;
use dashka_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "dashka-client")]
#[command(about = "Terminal client for the Dashka realtime translation relay", long_about = None)]
struct ClientArgs {
    /// Display name shown to the rest of the room
    #[arg(short = 'n', long)]
    username: String,

    /// Room to join; without one, translations go to every connected client
    #[arg(short = 'r', long)]
    room: Option<String>,

    #[arg(long, default_value = "user")]
    role: String,

    /// Source language code
    #[arg(long, default_value = "RU")]
    from: String,

    /// Target language code
    #[arg(long, default_value = "DE")]
    to: String,

    /// WebSocket endpoint
    #[arg(short = 'u', long, env = "DASHKA_WS_URL", default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Base URL of the HTTP API
    #[arg(long, env = "DASHKA_API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,
}

impl From<ClientArgs> for SessionOptions {
    fn from(args: ClientArgs) -> Self {
        Self {
            ws_url: args.url,
            api_url: args.api_url,
            username: args.username,
            room: args.room,
            role: args.role,
            from: args.from.to_ascii_uppercase(),
            to: args.to.to_ascii_uppercase(),
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = ClientArgs::parse();

    if let Err(e) = dashka_client::run_client(args.into()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
