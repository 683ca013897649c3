//! Repository-Trait fuer Benutzer-Datenzugriffe
//!
//! Entkoppelt den AuthService von der konkreten Datenbank. Die
//! SQLite-Implementierung liegt in `sqlite::users`; Tests nutzen
//! In-Memory-Implementierungen.

use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{BenutzerRecord, NeuerBenutzer};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://pharmalager.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pharmalager.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync {
    /// Einen neuen Benutzer anlegen.
    ///
    /// Gibt `DbError::Eindeutigkeit` zurueck wenn die E-Mail bereits
    /// vergeben ist (UNIQUE-Constraint; atomar auch bei parallelen
    /// Registrierungen).
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer anhand der (normalisierten) E-Mail laden
    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Anzahl aller Benutzer
    async fn anzahl(&self) -> DbResult<u64>;
}
