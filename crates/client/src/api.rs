//! HTTP-Anbindung an die Auth-Endpunkte
//!
//! Der `AuthApi`-Trait entkoppelt den SessionClient vom Netzwerk;
//! Tests haengen eigene Implementierungen ein.

use serde::Serialize;

use pharmalager_protocol::{ApiFehler, AuthAntwort, LoginRequest, RegistrierenRequest};

use crate::fehler::ClientFehler;

/// Schnittstelle zu den Auth-Endpunkten des Servers
#[allow(async_fn_in_trait)]
pub trait AuthApi: Send + Sync {
    async fn registrieren(&self, anfrage: &RegistrierenRequest) -> Result<AuthAntwort, ClientFehler>;
    async fn anmelden(&self, anfrage: &LoginRequest) -> Result<AuthAntwort, ClientFehler>;
}

/// Echte HTTP-Implementierung via reqwest
pub struct HttpAuthApi {
    basis_url: String,
    client: reqwest::Client,
}

impl HttpAuthApi {
    /// Erstellt einen Client fuer die gegebene Basis-URL
    /// (z.B. "http://localhost:8080")
    pub fn neu(basis_url: impl Into<String>) -> Self {
        Self {
            basis_url: basis_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn senden<B: Serialize + ?Sized>(
        &self,
        pfad: &str,
        body: &B,
    ) -> Result<AuthAntwort, ClientFehler> {
        let url = format!("{}{}", self.basis_url, pfad);
        let antwort = self.client.post(&url).json(body).send().await?;

        let status = antwort.status();
        if status.is_success() {
            return antwort
                .json::<AuthAntwort>()
                .await
                .map_err(|e| ClientFehler::Transport(format!("Unerwartete Serverantwort: {e}")));
        }

        // Fehlerkoerper parsen; unparsebare Koerper werden generisch
        let fehler = antwort
            .json::<ApiFehler>()
            .await
            .unwrap_or_else(|_| ApiFehler::neu(status.as_u16(), "Anfrage fehlgeschlagen."));

        Err(ClientFehler::Server {
            status: status.as_u16(),
            fehler,
        })
    }
}

impl AuthApi for HttpAuthApi {
    async fn registrieren(&self, anfrage: &RegistrierenRequest) -> Result<AuthAntwort, ClientFehler> {
        self.senden("/v1/auth/register", anfrage).await
    }

    async fn anmelden(&self, anfrage: &LoginRequest) -> Result<AuthAntwort, ClientFehler> {
        self.senden("/v1/auth/login", anfrage).await
    }
}
