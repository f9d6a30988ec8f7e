//! Currency swap quoting example
//!
//! Builds an index from an embedded feed snapshot and quotes a few swaps.
//!
//! Run with: cargo run --example swap_quote

use pricebook::holdings::totals_by_chain;
use pricebook::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== PriceBook: Swap Quote Example ===\n");

    // Snapshot of a real feed shape: repeated currencies, equal timestamps
    let raw = r#"[
        {"currency":"ATOM","date":"2023-08-29T07:10:40.000Z","price":7.186},
        {"currency":"ATOM","date":"2023-08-29T07:10:40.000Z","price":7.1847},
        {"currency":"OSMO","date":"2023-08-29T07:10:45.000Z","price":0.4242},
        {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.9337},
        {"currency":"USD","date":"2023-08-29T07:10:30.000Z","price":1.0},
        {"currency":"ZIL","date":"2023-08-29T07:10:42.000Z","price":0.01651}
    ]"#;

    let observations = parse_json(raw)?;
    println!("Parsed {} observations", observations.len());

    let index = LatestPriceIndex::from_observations(observations);
    println!("Indexed {} currencies: {:?}\n", index.len(), index.available_currencies());

    // Quote a swap
    let query = ConversionQuery::new("ATOM", "OSMO", 125.5);
    let quote = convert(&index, &query)?;
    println!(
        "Swap {} {} -> {:.6} {} (rate {:.6})",
        quote.source_amount, quote.source, quote.target_amount, quote.target, quote.rate
    );

    // Errors carry the failing input
    match convert(&index, &ConversionQuery::new("ATOM", "DOGE", 1.0)) {
        Ok(_) => println!("unexpected"),
        Err(e) => println!("Quote rejected as expected: {}", e),
    }
    println!();

    // Value a small wallet in USD
    let wallet = vec![
        WalletBalance::new("ETH", 1.5, Chain::Ethereum),
        WalletBalance::new("OSMO", 250.0, Chain::Osmosis),
        WalletBalance::new("ZIL", 10_000.0, Chain::Zilliqa),
        WalletBalance::new("ATOM", 0.0, Chain::Osmosis), // empty, skipped
    ];

    println!("Wallet (priority order):");
    for valued in value_balances(&index, &wallet, "USD")? {
        println!(
            "  [{}] {:.4} {} = {:.2} USD",
            valued.balance.chain, valued.balance.amount, valued.balance.currency, valued.value
        );
    }

    let totals = totals_by_chain(&index, &wallet, "USD")?;
    println!("\nTotals by chain:");
    for (chain, total) in &totals {
        println!("  {}: {:.2} USD", chain, total);
    }

    Ok(())
}
