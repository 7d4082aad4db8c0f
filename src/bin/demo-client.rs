use clap::Parser;
use tracing_subscriber::EnvFilter;

use disconnect_demo::config::DEFAULT_WAIT_SECS;
use disconnect_demo::services::message_board::MessageBoard;
use disconnect_demo::services::request_id::RequestId;
use disconnect_demo::services::requester::{RequestHandle, Requester, run_demo};

#[derive(Parser)]
#[command(name = "demo-client")]
#[command(about = "Issue /example requests and cancel them after a delay", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Seconds the server should wait before answering
    #[arg(short, long, default_value_t = DEFAULT_WAIT_SECS)]
    wait: f64,

    /// Cancel after this many milliseconds; zero or negative never cancels.
    /// Repeat for several concurrent requests. Without it, runs the two-request demo.
    #[arg(short, long)]
    cancel_after: Vec<i64>,

    #[arg(short, long, default_value = "cli")]
    label: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "disconnect_demo=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let board = MessageBoard::new();
    let requester = Requester::new(&cli.url, cli.wait, board.clone());

    let handles: Vec<RequestHandle> = if cli.cancel_after.is_empty() {
        run_demo(&requester)
    } else {
        cli.cancel_after
            .iter()
            .map(|ms| requester.spawn_request(RequestId::generate(), cli.label.clone(), *ms))
            .collect()
    };

    for handle in handles {
        handle.outcome().await?;
    }

    for line in board.lines().await {
        println!("{line}");
    }
    Ok(())
}
