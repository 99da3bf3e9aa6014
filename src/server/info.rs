//! Base path info exposure
//!
//! Serves the list of endpoints flagged `output_info` as JSON, the way a
//! client discovers which resource collections exist.

use super::registry::{BasePathInfo, Registry};
use axum::extract::State;
use axum::{Json, Router, routing::get};
use std::sync::Arc;

/// Router answering `GET {path}` with the registry's base path info
///
/// The listing is computed once; the registry does not change after startup.
pub fn base_path_routes<H>(path: &str, registry: &Registry<H>) -> Router {
    let info = Arc::new(registry.base_path_info());

    Router::new()
        .route(path, get(base_path_info))
        .with_state(info)
}

async fn base_path_info(State(info): State<Arc<BasePathInfo>>) -> Json<BasePathInfo> {
    Json(info.as_ref().clone())
}
