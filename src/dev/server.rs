/* src/dev/server.rs */

// Dev asset server: serves the bundler output and re-assembles the
// injected data on every request so route and locale edits show up on
// refresh without a rebuild.

use std::sync::Arc;

use anyhow::{Result, bail};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::services::ServeDir;

use crate::build::inject;
use crate::config::ShipwrightConfig;
use crate::paths::ProjectPaths;

pub(super) struct DevState {
  pub config: ShipwrightConfig,
  pub paths: ProjectPaths,
}

pub(super) fn build_router(state: Arc<DevState>) -> axum::Router {
  axum::Router::new()
    .route("/__shipwright/build-data.json", get(build_data))
    .fallback_service(ServeDir::new(state.paths.output.clone()))
    .with_state(state)
}

async fn build_data(
  State(state): State<Arc<DevState>>,
) -> Result<Json<inject::BuildData>, (StatusCode, String)> {
  match inject::assemble(&state.config, &state.paths, true) {
    Ok(data) => Ok(Json(data)),
    Err(e) => {
      tracing::warn!("injected data assembly failed: {e:#}");
      Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))
    }
  }
}

pub(super) async fn serve(state: Arc<DevState>, port: u16) -> Result<()> {
  let router = build_router(state);
  let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
  axum::serve(listener, router).await?;
  Ok(())
}

pub(super) fn find_available_port(preferred: u16) -> Result<u16> {
  if std::net::TcpListener::bind(("0.0.0.0", preferred)).is_ok() {
    return Ok(preferred);
  }
  for port in 8080..8180 {
    if port != preferred && std::net::TcpListener::bind(("0.0.0.0", port)).is_ok() {
      return Ok(port);
    }
  }
  bail!("no available port found in range 8080-8179");
}
