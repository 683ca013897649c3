//! Datenbankmodelle fuer Pharmalager
//!
//! Reine Datenuebertragungsobjekte zwischen Repository und Service.
//! Der `password_hash` verlaesst diese Schicht nie Richtung Client.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pharmalager_core::Rolle;

/// Benutzer-Datensatz aus der Datenbank
#[derive(Debug, Clone)]
pub struct BenutzerRecord {
    pub id: Uuid,
    /// Normalisierte E-Mail (Login-Schluessel, UNIQUE)
    pub email: String,
    /// PHC-String (argon2id) – niemals loggen oder serialisieren
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub rolle: Rolle,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    /// Bereits normalisierte E-Mail
    pub email: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
    pub rolle: Rolle,
}
