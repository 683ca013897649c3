//! pharmalager-observability – Logging und Health-Check
//!
//! - Structured Logging via tracing-subscriber (Text oder JSON)
//! - `GET /health` Router zum Einhaengen in den API-Server

pub mod health;
pub mod logging;

pub use health::{health_router, HealthState};
pub use logging::logging_initialisieren;
