//! Basic SDK usage example.
//!
//! Lists the customers reachable with a token, then the profiles of the
//! first one.
//!
//! Run with: SPROUT_API_TOKEN=... cargo run --example basic_usage

use sprout_sdk::{SproutClient, SproutResult};
use std::time::Duration;

#[tokio::main]
async fn main() -> SproutResult<()> {
    tracing_subscriber::fmt::init();

    let token = std::env::var("SPROUT_API_TOKEN").unwrap_or_default();

    let client = SproutClient::builder()
        .api_token(token)
        .timeout(Duration::from_secs(10))
        .build()?;

    println!("Listing customers...");
    let customers = match client.metadata().client().await {
        Ok(customers) => customers,
        Err(e) => {
            // Failures carry status, endpoint and upstream body.
            let record = serde_json::to_string_pretty(&e.to_record())?;
            eprintln!("{}", record);
            return Ok(());
        }
    };
    println!("{}", serde_json::to_string_pretty(&customers)?);

    let first = match &customers["data"][0]["customer_id"] {
        serde_json::Value::String(id) => id.clone(),
        serde_json::Value::Number(id) => id.to_string(),
        _ => {
            println!("No customers available");
            return Ok(());
        }
    };

    println!("\nProfiles for customer {}...", first);
    let profiles = client.metadata().profiles(&first).await?;
    println!("{}", serde_json::to_string_pretty(&profiles)?);

    Ok(())
}
