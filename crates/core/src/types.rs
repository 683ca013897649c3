//! Gemeinsame Identifikationstypen fuer Pharmalager
//!
//! IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! verschiedenen ID-Arten zur Compilezeit auszuschliessen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige Benutzer-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Erstellt eine neue zufaellige UserId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Normalisiert eine E-Mail-Adresse fuer Vergleich und Speicherung.
///
/// Richtlinie: Whitespace trimmen, dann Unicode-Kleinschreibung.
/// Wird sowohl bei der Eindeutigkeitspruefung (Registrierung) als auch
/// beim Login-Lookup angewendet – nie nur an einer Stelle.
pub fn email_normalisieren(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_eindeutig() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b, "Zwei neue UserIds muessen verschieden sein");
    }

    #[test]
    fn user_id_serde_transparent() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        // Transparent: nur der UUID-String, kein Wrapper-Objekt
        assert!(json.starts_with('"'));
        let zurueck: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, zurueck);
    }

    #[test]
    fn user_id_roundtrip_ueber_string() {
        let id = UserId::new();
        let geparst: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, geparst);
    }

    #[test]
    fn email_wird_getrimmt_und_kleingeschrieben() {
        assert_eq!(email_normalisieren("  Anna@Apotheke.DE "), "anna@apotheke.de");
        assert_eq!(email_normalisieren("schon@klein.de"), "schon@klein.de");
    }

    #[test]
    fn email_unicode_kleinschreibung() {
        assert_eq!(email_normalisieren("MÜLLER@apotheke.de"), "müller@apotheke.de");
    }
}
