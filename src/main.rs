//! pathgate demo server.
//!
//! Loads configuration, registers a handful of static and templated routes
//! and serves them until Ctrl+C.
//!
//! ```text
//! GET    /users               list users
//! GET    /users/{id}          show one user
//! GET    /api/v1/teams/{team}/{member}
//! PUT    /api/v1/teams/{team}/{member}
//! DELETE /api/v1/teams/{team}/{member}
//! ```

use axum::{body::Body, http::Request, http::StatusCode, Json};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use pathgate::config::{load_config, ServerConfig};
use pathgate::observability::{logging, metrics};
use pathgate::{compose, handler, log_requests, sub_route, Router, RouteVariablesExt};
use pathgate::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "pathgate")]
#[command(about = "HTTP router with static and templated routes", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("pathgate v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let router = Arc::new(Router::with_config(config.routing.clone()));
    register_routes(&router)?;
    tracing::info!(
        static_routes = ?router.routes(),
        templates = ?router.templates(),
        "Routes registered"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn register_routes(router: &Router) -> Result<(), pathgate::RouteError> {
    router.register(
        "/users",
        compose(handler(list_users), [log_requests()]),
        &["GET"],
    )?;
    router.register(
        "/users/{id}",
        compose(handler(show_user), [log_requests()]),
        &["GET"],
    )?;
    router.group(
        "/api/v1",
        [sub_route(
            "/teams/{team}/{member}",
            compose(handler(team_member), [log_requests()]),
            &["GET", "PUT", "DELETE"],
        )],
    )?;
    Ok(())
}

async fn list_users(_req: Request<Body>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "users": ["1", "2", "3"] }))
}

async fn show_user(req: Request<Body>) -> (StatusCode, Json<serde_json::Value>) {
    let id = req.route_var("id").unwrap_or_default();
    (StatusCode::OK, Json(serde_json::json!({ "id": id })))
}

async fn team_member(req: Request<Body>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "method": req.method().as_str(),
        "team": req.route_var("team"),
        "member": req.route_var("member"),
    }))
}
