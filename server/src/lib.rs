//! pharmalager-server – API-Server
//!
//! Verdrahtet Credential-Store, AuthService und JWT-Dienst mit dem
//! Axum-Router und startet den HTTP-Listener.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pharmalager_auth::{AuthService, JwtKonfig, JwtService};
use pharmalager_db::{DatabaseConfig, SqliteDb};
use pharmalager_observability::{health_router, HealthState};

pub mod config;
pub mod extractor;
pub mod handlers;
pub mod routes;

use config::ServerConfig;

/// Geteilter Zustand der Handler
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<SqliteDb>>,
    pub jwt: Arc<JwtService>,
}

/// Der Pharmalager-Server
pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Oeffnet die Datenbank, baut die Services und startet den
    /// HTTP-Listener. Laeuft bis zum Abbruch des Prozesses.
    pub async fn starten(self) -> Result<()> {
        let geheimnis = self.config.auth.jwt_geheimnis.trim();
        if geheimnis.is_empty() {
            anyhow::bail!("auth.jwt_geheimnis darf nicht leer sein");
        }
        if geheimnis == config::ENTWICKLUNGS_GEHEIMNIS {
            tracing::warn!(
                "JWT-Geheimnis ist der Entwicklungs-Platzhalter – fuer den Produktivbetrieb austauschen!"
            );
        }

        let db = SqliteDb::oeffnen(&DatabaseConfig {
            url: self.config.datenbank.url.clone(),
            max_verbindungen: self.config.datenbank.max_verbindungen,
            sqlite_wal: true,
        })
        .await?;

        let jwt = Arc::new(JwtService::neu(JwtKonfig {
            geheimnis: geheimnis.to_string(),
            aussteller: self.config.auth.aussteller.clone(),
            zielgruppe: self.config.auth.zielgruppe.clone(),
            gueltigkeit_minuten: self.config.auth.gueltigkeit_minuten,
        }));

        let auth = Arc::new(AuthService::neu(Arc::new(db), Arc::clone(&jwt)));
        let state = AppState { auth, jwt };

        // CORS konfigurieren: entweder spezifische Origins oder Any
        let cors = if self.config.netzwerk.cors_origins.is_empty() {
            CorsLayer::permissive()
        } else {
            let origins: Vec<HeaderValue> = self
                .config
                .netzwerk
                .cors_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(tower_http::cors::Any)
        };

        let app = routes::v1_router()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(state)
            .merge(health_router(HealthState::neu()));

        let adresse = self.config.api_bind_adresse();
        let listener = tokio::net::TcpListener::bind(&adresse).await?;
        tracing::info!(addr = %adresse, name = %self.config.server.name, "API-Server gestartet");

        axum::serve(listener, app).await?;
        Ok(())
    }
}
