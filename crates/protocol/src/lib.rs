//! pharmalager-protocol – Wire-Typen der REST-API
//!
//! Definiert die JSON-Koerper die zwischen SPA-Client und Server
//! ausgetauscht werden. Feldnamen auf dem Draht sind camelCase
//! (Konvention des Frontends), intern snake_case via serde-rename.

pub mod auth;

pub use auth::{
    ApiFehler, AuthAntwort, BenutzerProfil, FehlerDetail, FeldFehler, LoginRequest,
    RegistrierenRequest,
};
