//! Planning poker terminal client.
//!
//! Shows the room and refreshes it every second. Votes and admin actions are
//! typed at the prompt (`help` lists them).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin mitsumori-client -- --create
//! cargo run --bin mitsumori-client -- --room 48213
//! cargo run --bin mitsumori-client -- --url http://127.0.0.1:3000
//! ```

use clap::Parser;

use mitsumori_client::{StartRoom, run_client};
use mitsumori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "mitsumori-client")]
#[command(about = "Terminal client for planning poker rooms", long_about = None)]
struct Args {
    /// Server base URL
    #[arg(short = 'u', long, env = "PP_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    url: String,

    /// 5-digit room code to join
    #[arg(short = 'r', long, conflicts_with = "create")]
    room: Option<String>,

    /// Create a new room and become its admin
    #[arg(short = 'c', long)]
    create: bool,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();
    let start = match (args.room, args.create) {
        (Some(room), _) => StartRoom::Join(room),
        (None, true) => StartRoom::Create,
        (None, false) => StartRoom::None,
    };

    if let Err(e) = run_client(args.url, start).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
