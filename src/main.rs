//! Travel List Service Entry Point
//!
//! Loads configuration, connects to the database, and serves the HTTP API
//! and the bundled web client.

use travel_list::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
