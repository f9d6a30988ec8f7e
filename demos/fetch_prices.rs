//! Live feed fetching example
//!
//! Fetches the public price feed and quotes a conversion from it.
//!
//! Run with: cargo run --example fetch_prices --features async

use pricebook::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("=== PriceBook: Live Feed Example ===\n");

    let client = PriceFeedClient::new()?;
    println!("Fetching {}", client.url());

    match client.fetch_index().await {
        Ok(index) => {
            println!("✓ Indexed {} currencies\n", index.len());

            for currency in index.available_currencies().iter().take(10) {
                if let Some(obs) = index.observation(currency) {
                    println!("  {:<8} {:>16.8}  ({})", currency, obs.price, obs.timestamp);
                }
            }
            if index.len() > 10 {
                println!("  ... and {} more", index.len() - 10);
            }
            println!();

            match convert_amount(&index, 1.0, "ETH", "ATOM") {
                Ok(amount) => println!("1 ETH = {:.4} ATOM", amount),
                Err(e) => println!("✗ Quote failed: {}", e),
            }
            println!();

            // Value a sample wallet at live prices
            let wallet = vec![
                WalletBalance::new("ETH", 1.5, Chain::Ethereum),
                WalletBalance::new("OSMO", 250.0, Chain::Osmosis),
                WalletBalance::new("ATOM", 40.0, Chain::Osmosis),
            ];
            match value_balances(&index, &wallet, "USD") {
                Ok(valued) => {
                    println!("Sample wallet at live prices:");
                    for v in valued {
                        println!(
                            "  [{}] {:.4} {} = {:.2} USD",
                            v.balance.chain, v.balance.amount, v.balance.currency, v.value
                        );
                    }
                }
                Err(e) => println!("✗ Valuation failed: {}", e),
            }
        }
        Err(e) => {
            println!("✗ Fetch failed: {}", e);
            println!("  (Set RUST_LOG=debug for detailed logs)");
        }
    }

    Ok(())
}
