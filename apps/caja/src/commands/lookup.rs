//! One-shot customer lookups.

use puntos_client::{LoyaltyBackend, LoyaltyClient};
use puntos_core::qr::customer_qr_payload;

pub async fn balance(client: &LoyaltyClient, customer_id: i64) -> anyhow::Result<()> {
    let balance = client.balance(customer_id).await?;
    println!("Customer:    {}", balance.customer_name);
    println!("Accumulated: {} pts", balance.accumulated);
    println!("Redeemed:    {} pts", balance.redeemed);
    println!("Available:   {} pts", balance.available);
    Ok(())
}

pub async fn history(client: &LoyaltyClient, customer_id: i64) -> anyhow::Result<()> {
    let movements = client.history(customer_id).await?;
    if movements.is_empty() {
        println!("No movements yet.");
    }
    for movement in &movements {
        println!("{}", movement);
    }
    Ok(())
}

/// Prints what the member's "my QR" screen encodes.
pub fn qr(customer_id: i64) -> anyhow::Result<()> {
    anyhow::ensure!(customer_id > 0, "customer id must be greater than 0");
    println!("{}", customer_qr_payload(customer_id));
    Ok(())
}
