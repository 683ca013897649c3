//! REST-Handler Module

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use pharmalager_protocol::ApiFehler;

pub mod auth;

/// Fehlerantwort fuer die REST-API
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(ApiFehler::neu(status.as_u16(), nachricht))).into_response()
}
