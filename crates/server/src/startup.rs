use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::plans::PlanCatalog;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build router state from validated configuration
pub fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let catalog = PlanCatalog::from_config(&cfg.plans)?;
    Ok(ServerState {
        catalog: Arc::new(catalog),
        pagination: cfg.pagination.clone(),
    })
}

/// Build the complete application for `cfg`
pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg)?;
    Ok(routes::build_router(state, build_cors()))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build the app for `cfg` and run the HTTP server
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg)?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, plans = cfg.plans.len(), max_buttons = cfg.pagination.max_buttons, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
