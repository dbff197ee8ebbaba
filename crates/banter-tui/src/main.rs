//! banter TUI entry point.

use banter_tui::runtime::Runtime;
use clap::Parser;

/// banter terminal chat client
#[derive(Parser, Debug)]
#[command(name = "banter-tui")]
#[command(about = "Terminal client for the banter group chat")]
#[command(version)]
struct Args {
    /// WebSocket server URL to connect to (e.g. ws://localhost:5000/ws)
    ///
    /// If not provided, runs in simulation mode with an in-process server.
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; the alternate screen keeps stdout clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let runtime = match args.server {
        Some(url) => Runtime::with_remote_server(url)?,
        None => Runtime::new()?,
    };

    Ok(runtime.run().await?)
}
