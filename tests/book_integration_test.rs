//! Integration tests for the feed-to-quote pipeline
//!
//! Tests cross-module interactions and real-world usage scenarios

use chrono::{TimeZone, Utc};
use pricebook::convert::{convert, convert_amount, ConversionQuery};
use pricebook::error::PriceBookError;
use pricebook::feed::{parse_csv, parse_json};
use pricebook::holdings::{value_balances, Chain, WalletBalance};
use pricebook::index::LatestPriceIndex;
use pricebook::observation::PriceObservation;

#[test]
fn test_feed_to_quote_pipeline() {
    // Feed shape as published: repeats, mixed timestamp order
    let raw = r#"[
        {"currency":"ATOM","date":"2023-08-29T07:10:40.000Z","price":7.186},
        {"currency":"OSMO","date":"2023-08-29T07:10:45.000Z","price":0.4242},
        {"currency":"ATOM","date":"2023-08-29T07:09:10.000Z","price":7.365},
        {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.9337},
        {"currency":"USD","date":"2023-08-29T07:10:30.000Z","price":1.0}
    ]"#;

    let observations = parse_json(raw).unwrap();
    let index = LatestPriceIndex::from_observations(observations);

    assert_eq!(
        index.available_currencies(),
        vec!["ATOM", "ETH", "OSMO", "USD"]
    );
    // The later ATOM record wins despite arriving first
    assert_eq!(index.price("ATOM"), Some(7.186));

    let quote = convert(&index, &ConversionQuery::new("ETH", "ATOM", 2.0)).unwrap();
    assert!((quote.target_amount - 2.0 * 1645.9337 / 7.186).abs() < 1e-9);

    let usd = convert_amount(&index, 100.0, "OSMO", "USD").unwrap();
    assert!((usd - 42.42).abs() < 1e-9);
}

#[test]
fn test_latest_price_selection_end_to_end() {
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    let index = LatestPriceIndex::from_observations(vec![
        PriceObservation::new("A", 10.0, t1),
        PriceObservation::new("A", 12.0, t2),
        PriceObservation::new("B", 4.0, t1),
    ]);

    assert_eq!(index.available_currencies(), vec!["A", "B"]);

    // 6 * 12 / 4 with the newer A price in effect
    let amount = convert_amount(&index, 6.0, "A", "B").unwrap();
    assert_eq!(amount, 18.0);
}

#[test]
fn test_multi_currency_wallet_valuation() {
    let dt = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let index = LatestPriceIndex::from_observations(vec![
        PriceObservation::new("USD", 1.0, dt),
        PriceObservation::new("EUR", 1.20, dt),
        PriceObservation::new("GBP", 1.30, dt),
        PriceObservation::new("JPY", 0.0091, dt),
    ]);

    // Portfolio in multiple currencies
    let wallet = vec![
        WalletBalance::new("USD", 1000.0, Chain::Ethereum), // $1,000
        WalletBalance::new("EUR", 500.0, Chain::Ethereum),  // €500 = $600
        WalletBalance::new("GBP", 200.0, Chain::Arbitrum),  // £200 = $260
        WalletBalance::new("JPY", 10000.0, Chain::Neo),     // ¥10,000 = $91
    ];

    let valued = value_balances(&index, &wallet, "USD").unwrap();
    let total: f64 = valued.iter().map(|v| v.value).sum();

    assert!((total - 1951.0).abs() < 0.1);
}

#[test]
fn test_precondition_order_end_to_end() {
    let dt = Utc::now();
    let index = LatestPriceIndex::from_observations(vec![
        PriceObservation::new("ETH", 1600.0, dt),
        PriceObservation::new("DEAD", 0.0, dt),
    ]);

    // A bad amount wins over every later failure
    assert!(matches!(
        convert(&index, &ConversionQuery::new("XXX", "DEAD", f64::NAN)),
        Err(PriceBookError::InvalidAmount(_))
    ));

    // Unknown source wins over a zero-priced target
    assert!(matches!(
        convert(&index, &ConversionQuery::new("XXX", "DEAD", 5.0)),
        Err(PriceBookError::UnknownCurrency(code)) if code == "XXX"
    ));

    // Unknown source wins over unknown target
    assert!(matches!(
        convert(&index, &ConversionQuery::new("XXX", "YYY", 1.0)),
        Err(PriceBookError::UnknownCurrency(code)) if code == "XXX"
    ));

    // Unknown target wins over a zero-priced target
    assert!(matches!(
        convert(&index, &ConversionQuery::new("ETH", "YYY", 1.0)),
        Err(PriceBookError::UnknownCurrency(code)) if code == "YYY"
    ));

    // Zero-priced target reported last
    assert!(matches!(
        convert(&index, &ConversionQuery::new("ETH", "DEAD", 1.0)),
        Err(PriceBookError::DivisionByZero(code)) if code == "DEAD"
    ));
}

#[test]
fn test_rebuild_replaces_stale_snapshot() {
    let morning = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap();

    let am_index = LatestPriceIndex::from_observations(vec![
        PriceObservation::new("ATOM", 7.0, morning),
        PriceObservation::new("OSMO", 0.40, morning),
    ]);
    let pm_index = LatestPriceIndex::from_observations(vec![
        PriceObservation::new("ATOM", 7.5, evening),
        PriceObservation::new("OSMO", 0.45, evening),
        PriceObservation::new("ETH", 1650.0, evening),
    ]);

    // Each snapshot answers from its own feed only
    assert_eq!(am_index.price("ETH"), None);
    assert_eq!(pm_index.price("ATOM"), Some(7.5));
    assert_eq!(am_index.price("ATOM"), Some(7.0));
}

#[test]
fn test_json_and_csv_feeds_agree() {
    let json = r#"[
        {"currency":"ATOM","date":"2023-08-29T07:10:40.000Z","price":7.186},
        {"currency":"OSMO","date":"2023-08-29T07:10:45.000Z","price":0.4242}
    ]"#;
    let csv = "currency,date,price\n\
               ATOM,2023-08-29T07:10:40.000Z,7.186\n\
               OSMO,2023-08-29T07:10:45.000Z,0.4242\n";

    let from_json = LatestPriceIndex::from_observations(parse_json(json).unwrap());
    let from_csv = LatestPriceIndex::from_observations(parse_csv(csv).unwrap());

    assert_eq!(from_json, from_csv);
}

#[test]
fn test_empty_feed_yields_only_errors() {
    let index = LatestPriceIndex::from_observations(Vec::new());

    assert!(index.available_currencies().is_empty());
    assert!(matches!(
        convert_amount(&index, 1.0, "ETH", "ETH"),
        Err(PriceBookError::UnknownCurrency(_))
    ));
}
