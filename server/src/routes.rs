//! Route-Definitionen fuer die REST-API (/v1/...)

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Erstellt den vollstaendigen /v1/-Router
pub fn v1_router() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(handlers::auth::register))
        .route("/v1/auth/login", post(handlers::auth::login))
        .route("/v1/auth/me", get(handlers::auth::me))
}
