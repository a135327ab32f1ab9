//! Payroll engine HTTP server.
//!
//! Reads `PAYROLL_CONFIG_DIR` (default `./config`) and `PAYROLL_BIND_ADDR`
//! (default `0.0.0.0:3000`). Log filtering honours `RUST_LOG`.

use std::env;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let state = AppState::load(&config_dir);
    for failure in state.snapshot().load_failures() {
        warn!(table = %failure.table, error = %failure.error, "Serving with default table");
    }

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, config_dir = %config_dir, "Payroll engine listening");

    axum::serve(listener, create_router(state)).await
}
