//! Sales and shipment report over CSV exports.
//!
//! Run with:
//! cargo run --example sales_report -- sales.csv shipments.csv
//!
//! `sales.csv` needs the columns `Week`, `Brand`, `Wslr`,
//! `Week's Sales (Barrels)` and `1 Week Forecast Demand`.
//! `shipments.csv` needs `Week Beginning`, `Wslr`, `Barrels` and `Shipped`.
//! Set `RUST_LOG=anofox_bullwhip=debug` to see aggregation details.

use anofox_bullwhip::bullwhip::BullwhipQuery;
use anofox_bullwhip::core::{Granularity, Table};
use anofox_bullwhip::grouping::{
    mape_by_group, observed_keys, seasonal_by_group, smoothing_by_group,
};
use anofox_bullwhip::io::read_csv_path;
use anofox_bullwhip::seasonality::{SeasonOfYear, SeasonalProfile};
use anofox_bullwhip::utils::mape;
use anofox_bullwhip::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SALES: &str = "Week's Sales (Barrels)";
const FORECAST: &str = "1 Week Forecast Demand";

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anofox_bullwhip=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <sales.csv> <shipments.csv>", args[0]);
        std::process::exit(2);
    }

    if let Err(e) = run(&args[1], &args[2]) {
        eprintln!("report failed: {e}");
        std::process::exit(1);
    }
}

fn run(sales_path: &str, shipments_path: &str) -> Result<()> {
    let sales = read_csv_path(sales_path)?;
    let shipments = read_csv_path(shipments_path)?;

    println!("=== Sales & Demand Forecasts ===\n");
    println!("{}", sales.schema());
    forecast_accuracy(&sales)?;

    println!("\n=== Shipment Data ===\n");
    println!("{}", shipments.schema());
    bullwhip_report(&shipments)?;

    Ok(())
}

fn forecast_accuracy(sales: &Table) -> Result<()> {
    println!("--- Forecast accuracy ---");
    let (actuals, forecasts) = sales.paired_series(SALES, FORECAST, Some("Week"))?;
    match mape(&actuals, &forecasts) {
        Ok(score) => println!("Overall MAPE: {score:.2}%"),
        Err(e) => println!("Overall MAPE: n/a ({e})"),
    }

    let outcome = mape_by_group(sales, &["Wslr"], SALES, FORECAST, Some("Week"))?;
    for (key, score) in &outcome.successes {
        println!("  {key}: {score:.2}%");
    }
    for (key, err) in &outcome.failures {
        println!("  {key}: n/a ({err})");
    }

    println!("\n--- Smoothing forecasts per wholesaler (alpha = 0.3) ---");
    let profile = SeasonalProfile::from_table(sales, "Week", SALES, SeasonOfYear::Week)?;
    println!("Seasonal strength: {:.4}", profile.strength());

    let baseline = smoothing_by_group(sales, &["Wslr"], "Week", SALES, 0.3)?;
    let seasonal = seasonal_by_group(sales, &["Wslr"], "Week", SALES, &profile, 0.3)?;
    for (key, forecast) in &baseline.successes {
        let adjusted = seasonal
            .successes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, f)| format!("{:.2}%", f.mape))
            .unwrap_or_else(|| "n/a".to_string());
        println!("  {key}: smoothing {:.2}%, seasonal {adjusted}", forecast.mape);
    }
    for (key, err) in &baseline.failures {
        println!("  {key}: n/a ({err})");
    }

    Ok(())
}

fn bullwhip_report(shipments: &Table) -> Result<()> {
    println!("--- Bullwhip effect (monthly) ---");
    let query = BullwhipQuery::new("Week Beginning", "Barrels", "Shipped")
        .granularity(Granularity::Month);

    match query.measure(shipments) {
        Ok(m) => {
            println!("{}", m.periods);
            println!("{}", m.result);
        }
        Err(e) => println!("Overall: n/a ({e})"),
    }

    for key in observed_keys(shipments, &["Wslr"])? {
        let Some(wslr) = key.value("Wslr") else {
            continue;
        };
        let per_wslr = query.clone().filter("Wslr", wslr.clone());
        match per_wslr.measure(shipments) {
            Ok(m) => println!(
                "  {key}: ratio {:.4} over {} months{}",
                m.result.ratio,
                m.result.n_periods,
                if m.result.is_amplified() { " (amplified)" } else { "" }
            ),
            Err(e) => println!("  {key}: n/a ({e})"),
        }
    }

    Ok(())
}
