//! MailGuard Proxy Server
//!
//! Fronts the phishing analyzer service for the slim MailGuard web client.
//! Provides REST API endpoints for:
//!
//! - Message analysis (forwarded to the analyzer, enriched with the
//!   reassembled text and resolved highlight segments)
//! - Analyzer rule catalog listing
//! - Message text preview
//!
//! ## Architecture
//!
//! This server acts as a proxy between the frontend and the analyzer,
//! providing:
//!
//! - Rate limiting via tower-governor
//! - Request validation before anything crosses the wire
//! - CORS for browser clients

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod client;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_analyze, handle_health, handle_list_rules, handle_preview};
use client::AnalyzerClient;

/// Command-line arguments for the MailGuard server
#[derive(Parser, Debug)]
#[command(name = "mailguard-api")]
#[command(about = "MailGuard proxy server for the phishing analyzer")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Base URL of the analyzer service
    #[arg(long, env = "MAILGUARD_ANALYZER_URL", default_value = "http://127.0.0.1:8000")]
    analyzer_url: String,

    /// Upstream request timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Client for the upstream analyzer
    pub analyzer: AnalyzerClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MailGuard server on {}:{}", args.host, args.port);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    // Create shared state; the analyzer address is injected here and only here
    let state = AppState {
        analyzer: AnalyzerClient::new(&args.analyzer_url, args.timeout_ms)?,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/rules", get(handle_list_rules))
        .route("/api/preview", post(handle_preview))
        .route("/api/analyze", post(handle_analyze))
        // Apply middleware
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Analyzer upstream: {}", args.analyzer_url);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Upstream timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
