//! Client example demonstrating the insert and convert flows against a
//! running server backed by the in-memory store.
//!
//! Run with: cargo run -p converter-app --example client_example

use std::collections::BTreeMap;
use std::net::SocketAddr;

use converter_client::{ClientError, ConverterClient};
use converter_hex::{ConverterService, inbound::HttpServer};
use converter_repo::InMemoryRateStore;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr}...");

    // Start server in background
    let server = HttpServer::new(ConverterService::new(InMemoryRateStore::new()));
    let router = server.router();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = ConverterClient::new(format!("http://{addr}"));
    println!("Health: {}", client.health().await?);

    // ─────────────────────────────────────────────────────────────────────────
    // Replace all rates, then merge an update
    // ─────────────────────────────────────────────────────────────────────────

    let rates = BTreeMap::from([
        ("RUB".to_string(), 1.0),
        ("USD".to_string(), 60.0),
        ("EUR".to_string(), 65.0),
    ]);
    client.insert(rates, false).await?;
    println!("Stored RUB, USD, EUR");

    println!("180 RUB -> USD = {}", client.convert("RUB", "USD", 180.0).await?);
    println!("2 usd -> rub = {}", client.convert("usd", "rub", 2.0).await?);

    client
        .insert(BTreeMap::from([("USD".to_string(), 30.0)]), true)
        .await?;
    println!("Merged USD = 30");
    println!("2 USD -> RUB = {}", client.convert("USD", "RUB", 2.0).await?);

    // ─────────────────────────────────────────────────────────────────────────
    // Error responses
    // ─────────────────────────────────────────────────────────────────────────

    match client.convert("USD", "XYZ", 1.0).await {
        Err(ClientError::Api { status, message }) => println!("{status}: {message}"),
        other => println!("unexpected: {other:?}"),
    }

    match client
        .insert(BTreeMap::from([("BAD".to_string(), -1.0)]), true)
        .await
    {
        Err(ClientError::Api { status, message }) => println!("{status}: {message}"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
