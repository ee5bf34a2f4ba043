//! Terminal rendering of the market state.

use crate::models::{
    FundingBehavior, MarketState, MetricKind, MetricValue, RiskLevel, StateResult, TrendDirection,
};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Everything one dashboard frame shows.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub backend_url: String,
    pub state: Option<StateResult>,
    pub data: Option<BTreeMap<MetricKind, MetricValue>>,
    pub updated_at: DateTime<Local>,
}

pub fn risk_marker(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::High => "🔴",
        RiskLevel::Medium => "🟡",
        RiskLevel::Low => "🟢",
    }
}

/// `1234567.891` -> `$1,234,567.89`
pub fn format_usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

fn quadrant_cell(quadrant: MarketState, current: MarketState) -> String {
    if quadrant == current {
        format!(">> {} <<", quadrant.label())
    } else {
        format!("   {}   ", quadrant.label())
    }
}

fn render_quadrants(out: &mut String, current: MarketState) {
    let columns = [FundingBehavior::Defensive, FundingBehavior::Offensive];
    let rows = [TrendDirection::Bullish, TrendDirection::Bearish];

    let _ = writeln!(
        out,
        "{:8}{:^14}{:^14}",
        "",
        columns[0].label(),
        columns[1].label()
    );
    for trend in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|funding| quadrant_cell(MarketState::from_parts(trend, *funding), current))
            .collect();
        let _ = writeln!(out, "{:8}{:^14}{:^14}", trend.label(), cells[0], cells[1]);
    }
}

fn render_unavailable(out: &mut String, backend_url: &str) {
    let _ = writeln!(out, "⚠️  Market state unavailable. Is the backend running?");
    let _ = writeln!(out, "Backend: {}", backend_url);
    let _ = writeln!(out);
    let _ = writeln!(out, "Start it with:");
    let _ = writeln!(out, "  cargo run --bin api-server");
}

pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 BullBear Dashboard");
    let _ = writeln!(out, "Crypto market state machine, four-quadrant view");
    let _ = writeln!(out);

    let Some(result) = &view.state else {
        render_unavailable(&mut out, &view.backend_url);
        return out;
    };

    let rule = "=".repeat(40);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "  {}", result.state.label());
    let _ = writeln!(out, "  {} | {}", result.trend.label(), result.funding.label());
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Risk level:  {} {}",
        risk_marker(result.risk_level),
        result.risk_level
    );
    let _ = writeln!(out, "Confidence:  {:.1}%", result.confidence * 100.0);
    let _ = writeln!(
        out,
        "Updated:     {}",
        view.updated_at.format("%Y-%m-%d %H:%M:%S")
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "📈 Quadrants");
    render_quadrants(&mut out, result.state);

    let meta = &result.metadata;
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Details");
    let _ = writeln!(out, "{:<18}{}", "BTC price", format_usd(meta.btc_price));
    let _ = writeln!(out, "{:<18}{}", "MA50", format_usd(meta.ma50));
    let _ = writeln!(out, "{:<18}{}", "MA200", format_usd(meta.ma200));
    let _ = writeln!(
        out,
        "{:<18}{:.2}%",
        "Stablecoin ratio", meta.stablecoin_ratio
    );

    if let Some(data) = view.data.as_ref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "🔍 Raw data");
        let _ = writeln!(out, "{:<24}{:>24}  {}", "Metric", "Value", "Provider");
        for (kind, metric) in data {
            let _ = writeln!(
                out,
                "{:<24}{:>24.2}  {}",
                kind.as_str(),
                metric.value,
                metric.provider
            );
        }
    }

    out
}
