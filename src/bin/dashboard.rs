//! BullBear terminal dashboard
//!
//! Fetches `/api/state` and `/api/data` from the backend and prints the
//! four-quadrant view. Pass `--watch <seconds>` to refresh periodically.

use bullbear::config::Config;
use bullbear::dashboard::{render, BackendClient, DashboardView};
use bullbear::logging;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

async fn frame(client: &BackendClient) -> String {
    let (state, data) = tokio::join!(client.fetch_state(), client.fetch_data());
    render(&DashboardView {
        backend_url: client.base_url().to_string(),
        state,
        data,
        updated_at: chrono::Local::now(),
    })
}

fn watch_interval() -> Option<Duration> {
    let args: Vec<String> = env::args().collect();
    let position = args.iter().position(|a| a == "--watch")?;
    let seconds = args
        .get(position + 1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60);
    Some(Duration::from_secs(seconds.max(1)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_cli_logging();

    let config = Config::from_env()?;
    let client = BackendClient::new(&config.backend_url)?;

    match watch_interval() {
        None => println!("{}", frame(&client).await),
        Some(interval) => loop {
            // Clear screen and home the cursor between frames
            print!("\x1B[2J\x1B[H");
            println!("{}", frame(&client).await);
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = tokio::signal::ctrl_c() => break,
            }
        },
    }

    Ok(())
}
