use bullbear::config::Config;
use bullbear::logging;
use bullbear::models::StateResult;
use bullbear::services::DataFetcher;
use bullbear::StateMachineEngine;
use dotenvy::dotenv;

/// One-shot evaluation: fetch the metrics, classify, print.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let fetcher = DataFetcher::from_config(&config)?;

    let snapshot = fetcher.snapshot().await?;
    let result = StateMachineEngine::new(&snapshot).evaluate()?;

    print_result(&result);
    Ok(())
}

fn print_result(result: &StateResult) {
    let meta = &result.metadata;
    println!("Market state: {} ({})", result.state.label(), result.state.code());
    println!("  Trend:      {} ({})", result.trend.label(), result.trend.code());
    println!("  Funding:    {} ({})", result.funding.label(), result.funding.code());
    println!("  Risk:       {}", result.risk_level);
    println!("  Confidence: {:.2}%", result.confidence * 100.0);
    println!("  Inputs:");
    println!("    BTC price:             {:.2}", meta.btc_price);
    println!("    MA50:                  {:.2}", meta.ma50);
    println!("    MA200:                 {:.2}", meta.ma200);
    println!("    Total market cap:      {:.0}", meta.total_market_cap);
    println!("    Stablecoin market cap: {:.0}", meta.stablecoin_market_cap);
    println!("    Stablecoin ratio:      {:.2}%", meta.stablecoin_ratio);
}
