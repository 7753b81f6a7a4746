//! Integration tests for the sales/shipment reporting flow.
//!
//! These tests load CSV exports of the "Sales & Demand Forecasts" and
//! "Shipment Data" sheets and run the same sequence of calculations a
//! report would: schema, per-wholesaler MAPE, seasonal forecasts and the
//! monthly bullwhip ratio.

use anofox_bullwhip::bullwhip::{BullwhipConfig, BullwhipQuery};
use anofox_bullwhip::core::{Cell, ColumnType, Granularity, Table};
use anofox_bullwhip::error::ForecastError;
use anofox_bullwhip::grouping::{
    cartesian_keys, evaluate_groups, mape_by_group, seasonal_by_group, smoothing_by_group,
};
use anofox_bullwhip::io::read_csv;
use anofox_bullwhip::pipeline::{baseline_forecast, seasonal_forecast};
use anofox_bullwhip::seasonality::{SeasonOfYear, SeasonalProfile};
use anofox_bullwhip::utils::{mape, sample_variance};
use approx::assert_relative_eq;

const SALES_CSV: &str = "\
Week,Brand,Wslr,Week's Sales (Barrels),1 Week Forecast Demand
2017-01-02,Bud,W1,100,90
2017-01-09,Bud,W1,120,110
2017-01-16,Bud,W1,0,15
2017-01-23,Bud,W1,110,118
2017-01-02,Bud,W2,50,55
2017-01-09,Bud,W2,60,50
2017-01-16,Bud,W2,,40
2017-01-23,Bud,W2,45,45
2017-01-02,Lite,W1,0,4
2017-01-09,Lite,W1,0,2
";

const SHIPMENT_CSV: &str = "\
Week Beginning,Wslr,Barrels,Shipped
2017-01-02,W1,100,80
2017-01-09,W1,120,200
2017-01-30,W1,90,60
2017-02-06,W1,130,240
2017-02-13,W1,oops,100
2017-02-20,W1,110,50
2017-03-06,W1,140,260
bad-date,W1,999,999
2017-03-20,W1,,120
2017-04-03,W2,75,75
2017-04-10,W2,80,80
";

fn sales() -> Table {
    read_csv(SALES_CSV.as_bytes()).unwrap()
}

fn shipments() -> Table {
    read_csv(SHIPMENT_CSV.as_bytes()).unwrap()
}

#[test]
fn schema_reports_types_and_nulls() {
    let schema = sales().schema();
    assert_eq!(schema.rows, 10);
    let sales_col = schema
        .columns
        .iter()
        .find(|c| c.name == "Week's Sales (Barrels)")
        .unwrap();
    assert_eq!(sales_col.column_type, ColumnType::Numeric);
    assert_eq!(sales_col.null, 1);
    assert_eq!(schema.columns[0].column_type, ColumnType::Date);
    assert_eq!(schema.columns[2].column_type, ColumnType::Text);
}

#[test]
fn overall_mape_skips_zero_actuals() {
    let (actuals, forecasts) = sales()
        .paired_series("Week's Sales (Barrels)", "1 Week Forecast Demand", None)
        .unwrap();
    // The blank sales cell is dropped at the boundary
    assert_eq!(actuals.len(), 9);
    let score = mape(&actuals, &forecasts).unwrap();
    assert!(score > 0.0);
}

#[test]
fn mape_per_wholesaler_and_brand() {
    let outcome = mape_by_group(
        &sales(),
        &["Brand", "Wslr"],
        "Week's Sales (Barrels)",
        "1 Week Forecast Demand",
        Some("Week"),
    )
    .unwrap();

    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.successes.len(), 2);

    let (key, w1) = &outcome.successes[0];
    assert_eq!(key.to_string(), "Brand=Bud, Wslr=W1");
    let expected = (10.0 / 100.0 + 10.0 / 120.0 + 8.0 / 110.0) / 3.0 * 100.0;
    assert_relative_eq!(*w1, expected, epsilon = 1e-10);

    // Lite only ever sold zero barrels
    let (key, err) = &outcome.failures[0];
    assert_eq!(key.to_string(), "Brand=Lite, Wslr=W1");
    assert_eq!(*err, ForecastError::NoValidPeriods);
}

#[test]
fn cartesian_fan_out_reports_empty_groups() {
    let table = sales();
    let keys = cartesian_keys(&table, &["Brand", "Wslr"]).unwrap();
    assert_eq!(keys.len(), 4);

    let outcome = evaluate_groups(&table, &keys, |rows| {
        let (a, f) = rows.paired_series(
            "Week's Sales (Barrels)",
            "1 Week Forecast Demand",
            Some("Week"),
        )?;
        mape(&a, &f)
    });
    // Lite/W1 (all zeros) and Lite/W2 (no rows) fail; the Bud pairs succeed
    assert_eq!(outcome.successes.len(), 2);
    assert_eq!(outcome.failures.len(), 2);
    assert!(outcome
        .failures
        .iter()
        .all(|(_, e)| *e == ForecastError::NoValidPeriods));
}

#[test]
fn monthly_bullwhip_for_one_wholesaler() {
    let m = BullwhipQuery::new("Week Beginning", "Barrels", "Shipped")
        .filter("Wslr", "W1")
        .granularity(Granularity::Month)
        .measure(&shipments())
        .unwrap();

    // Jan: 310 / 340, Feb: 240 / 290 (the "oops" row is dropped), Mar: 140 / 260
    assert_eq!(m.periods.demand(), vec![310.0, 240.0, 140.0]);
    assert_eq!(m.periods.shipments(), vec![340.0, 290.0, 260.0]);

    let var_demand = sample_variance(&[310.0, 240.0, 140.0], 1).unwrap();
    let var_shipments = sample_variance(&[340.0, 290.0, 260.0], 1).unwrap();
    assert_relative_eq!(m.result.var_demand, var_demand, epsilon = 1e-9);
    assert_relative_eq!(m.result.var_shipments, var_shipments, epsilon = 1e-9);
    assert_relative_eq!(m.result.ratio, var_shipments / var_demand, epsilon = 1e-12);
    assert_eq!(m.result.n_periods, 3);
}

#[test]
fn overall_bullwhip_with_same_column() {
    let m = BullwhipQuery::new("Week Beginning", "Barrels", "Barrels")
        .measure(&shipments())
        .unwrap();
    assert_relative_eq!(m.result.ratio, 1.0, epsilon = 1e-12);
    // Jan, Feb, Mar, Apr
    assert_eq!(m.result.n_periods, 4);
}

#[test]
fn wholesaler_with_one_month_is_insufficient() {
    let query = BullwhipQuery::new("Week Beginning", "Barrels", "Shipped")
        .filter("Wslr", "W2")
        .granularity(Granularity::Week);
    let m = query.clone().measure(&shipments()).unwrap();
    assert_relative_eq!(m.result.ratio, 1.0, epsilon = 1e-12);

    let one_month = query
        .granularity(Granularity::Month)
        .config(BullwhipConfig::new().with_epsilon(1.0))
        .measure(&shipments());
    assert_eq!(
        one_month,
        Err(ForecastError::InsufficientObservations { needed: 2, got: 1 })
    );
}

#[test]
fn seasonal_forecast_from_pooled_profile() {
    let table = shipments().filter_eq("Wslr", &Cell::from("W1")).unwrap();
    let profile =
        SeasonalProfile::from_table(&table, "Week Beginning", "Barrels", SeasonOfYear::Month)
            .unwrap();
    assert_eq!(profile.seasons(), &[1, 2, 3]);
    assert!(profile.strength() > 0.0);

    let pairs = table
        .dated_pairs("Week Beginning", "Barrels", "Shipped")
        .unwrap();
    let barrels = pairs.first;
    let dates = pairs.dates;
    assert_eq!(dates.len(), barrels.len());
    assert_eq!(barrels, vec![100.0, 120.0, 90.0, 130.0, 110.0, 140.0]);

    let index = profile.index_for(&dates).unwrap();
    let seasonal = seasonal_forecast(&barrels, &index, 0.3).unwrap();
    let plain = baseline_forecast(&barrels, 0.3).unwrap();

    assert_eq!(seasonal.forecasts.len(), barrels.len());
    assert_relative_eq!(seasonal.forecasts[0], barrels[0], epsilon = 1e-9);
    assert!(seasonal.mape.is_finite());
    assert!(plain.mape.is_finite());
}

#[test]
fn date_before_earliest_week_is_dropped() {
    let table = read_csv("D,A,B\n-262143-01-01,1,2\n2017-01-02,3,4\n2017-01-09,5,7\n".as_bytes())
        .unwrap();
    let m = BullwhipQuery::new("D", "A", "B")
        .granularity(Granularity::Week)
        .measure(&table)
        .unwrap();
    assert_eq!(m.result.n_periods, 2);
    assert_relative_eq!(m.result.ratio, 2.25, epsilon = 1e-12);
}

const INTERLEAVED_CSV: &str = "\
Week,Wslr,Sales
2017-01-02,W1,100
2017-01-02,W2,10
2017-01-09,W1,100
2017-01-09,W2,10
2017-01-16,W1,100
2017-01-16,W2,10
2017-01-23,W1,100
2017-01-23,W2,10
";

#[test]
fn smoothing_never_mixes_partners() {
    let table = read_csv(INTERLEAVED_CSV.as_bytes()).unwrap();

    let outcome = smoothing_by_group(&table, &["Wslr"], "Week", "Sales", 0.3).unwrap();
    assert_eq!(outcome.successes.len(), 2);
    for (key, forecast) in &outcome.successes {
        assert_relative_eq!(forecast.mape, 0.0, epsilon = 1e-12);
        let level = if key.to_string() == "Wslr=W1" { 100.0 } else { 10.0 };
        for f in &forecast.forecasts {
            assert_relative_eq!(*f, level, epsilon = 1e-9);
        }
    }

    let profile =
        SeasonalProfile::from_table(&table, "Week", "Sales", SeasonOfYear::Week).unwrap();
    let seasonal = seasonal_by_group(&table, &["Wslr"], "Week", "Sales", &profile, 0.3).unwrap();
    assert!(seasonal.is_complete());
    for (_, forecast) in &seasonal.successes {
        assert_relative_eq!(forecast.mape, 0.0, epsilon = 1e-9);
    }

    // The whole sheet as one sequence alternates between the two levels
    let (_, pooled) = table.dated_values("Week", "Sales").unwrap();
    assert!(baseline_forecast(&pooled, 0.3).unwrap().mape > 100.0);
}
