//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

/// Einzelner Validierungsfehler eines Eingabefelds
#[derive(Debug, Clone, PartialEq)]
pub struct FeldFehler {
    pub feld: String,
    pub meldung: String,
}

impl FeldFehler {
    pub fn neu(feld: impl Into<String>, meldung: impl Into<String>) -> Self {
        Self {
            feld: feld.into(),
            meldung: meldung.into(),
        }
    }
}

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("Eingabe ungueltig ({} Felder)", .0.len())]
    Validierung(Vec<FeldFehler>),

    // --- Registrierung ---
    #[error("E-Mail bereits vergeben: {0}")]
    EmailVergeben(String),

    // --- Authentifizierung ---
    // Eine Meldung fuer beide Faelle (unbekannte E-Mail, falsches
    // Passwort) – Kontoauflistung darf nicht moeglich sein.
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Token ---
    #[error("Token ungueltig")]
    TokenUngueltig,

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] pharmalager_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
