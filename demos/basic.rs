//! Basic example demonstrating the Hoopla API client.
//!
//! Run with:
//! ```
//! HOOPLA_CLIENT_ID=id HOOPLA_CLIENT_SECRET=secret cargo run --example basic
//! ```

use hoopla::{HasOwner, HooplaClient, Resource};

#[tokio::main]
async fn main() -> hoopla::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Authenticate with the client-credentials grant
    println!("Creating Hoopla client...");
    let client = HooplaClient::from_env().await?;
    println!("Connected to: {}", client.base_url());

    let root = client.connect().await?;

    // List users
    println!("\n--- Users ---");
    let users = root.users().await?;
    println!("Found {} users", users.len());
    for user in users.iter().take(10) {
        println!("  - {} <{}>", user.display_name(), user.email().unwrap_or("?"));
    }

    // List metrics and the values of the first one
    println!("\n--- Metrics ---");
    let metrics = root.metrics().await?;
    for metric in &metrics {
        println!(
            "  - {} ({})",
            metric.name().unwrap_or("unnamed"),
            metric.metric_type().unwrap_or("unknown")
        );
    }

    if let Some(metric) = metrics.first() {
        println!("\n--- Values of {} ---", metric.name().unwrap_or("unnamed"));
        let values = metric.values().await?;
        println!("Found {} values", values.len());

        for value in values.iter().take(5) {
            let owner = match value.resolve_owner().await? {
                Some(owner) => owner.to_string(),
                None => "nobody".to_string(),
            };
            let amount = value.value().map(|v| v.to_string()).unwrap_or_default();
            println!("  {owner}: {amount}");
        }
    }

    // Newsflashes, each with the relations it advertises
    println!("\n--- Newsflashes ---");
    for newsflash in root.newsflashes().await? {
        let relations: Vec<&str> = newsflash
            .attributes()
            .relations()
            .keys()
            .map(String::as_str)
            .collect();
        println!(
            "  - {} [{}]",
            newsflash.name().unwrap_or("unnamed"),
            relations.join(", ")
        );
    }

    println!("\nDone!");
    Ok(())
}
