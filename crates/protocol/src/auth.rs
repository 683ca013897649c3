//! Auth-Nachrichten
//!
//! Request-/Response-Koerper fuer Registrierung und Login sowie der
//! strukturierte Fehlerkoerper. Das Passwort reist im Klartext im
//! Request-Koerper (TLS-Terminierung liegt ausserhalb dieses Systems)
//! und wird serverseitig sofort gehasht.

use serde::{Deserialize, Serialize};

use pharmalager_core::{Rolle, UserId};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Registrierungs-Anfrage vom Client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrierenRequest {
    /// Vollstaendiger Name
    pub full_name: String,
    /// E-Mail-Adresse (Login-Schluessel; wird serverseitig normalisiert)
    pub email: String,
    /// Passwort (Klartext – wird serverseitig gehasht)
    pub password: String,
    /// Telefonnummer (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Gewuenschte Rolle; fehlt sie, gilt Customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Rolle>,
}

/// Login-Anfrage vom Client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Erfolgreiche Auth-Antwort (Registrierung und Login identisch)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthAntwort {
    /// Signierter JWT
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Rolle,
}

impl AuthAntwort {
    /// Extrahiert das nicht-geheime Profil (das, was der Client persistiert)
    pub fn profil(&self) -> BenutzerProfil {
        BenutzerProfil {
            user_id: self.user_id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            role: self.role,
        }
    }
}

/// Nicht-geheime Benutzerdaten, wie der Client sie lokal ablegt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenutzerProfil {
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Rolle,
}

// ---------------------------------------------------------------------------
// Fehlerkoerper
// ---------------------------------------------------------------------------

/// Einzelner Feldfehler einer Validierung
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeldFehler {
    pub field: String,
    pub message: String,
}

/// Innerer Fehlerblock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FehlerDetail {
    pub code: u16,
    pub message: String,
    /// Feldbezogene Validierungsfehler, falls vorhanden
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FeldFehler>,
}

/// Fehlerkoerper der REST-API: `{"error": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFehler {
    pub error: FehlerDetail,
}

impl ApiFehler {
    pub fn neu(code: u16, message: impl Into<String>) -> Self {
        Self {
            error: FehlerDetail {
                code,
                message: message.into(),
                fields: Vec::new(),
            },
        }
    }

    pub fn mit_feldern(code: u16, message: impl Into<String>, fields: Vec<FeldFehler>) -> Self {
        Self {
            error: FehlerDetail {
                code,
                message: message.into(),
                fields,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_camel_case() {
        let json = r#"{
            "fullName": "Anna Muster",
            "email": "anna@apotheke.de",
            "password": "geheim123",
            "phone": "030123456"
        }"#;
        let req: RegistrierenRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.full_name, "Anna Muster");
        assert_eq!(req.phone.as_deref(), Some("030123456"));
        assert!(req.role.is_none(), "Fehlende Rolle bleibt None");
    }

    #[test]
    fn auth_antwort_wire_format() {
        let antwort = AuthAntwort {
            token: "kopf.rumpf.signatur".into(),
            user_id: UserId::new(),
            email: "anna@apotheke.de".into(),
            full_name: "Anna Muster".into(),
            phone: None,
            role: Rolle::Customer,
        };
        let json = serde_json::to_string(&antwort).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"role\":\"Customer\""));
        // phone fehlt auf dem Draht wenn None
        assert!(!json.contains("phone"));
    }

    #[test]
    fn profil_uebernimmt_felder() {
        let antwort = AuthAntwort {
            token: "t".into(),
            user_id: UserId::new(),
            email: "e@x.de".into(),
            full_name: "E X".into(),
            phone: Some("1".into()),
            role: Rolle::Admin,
        };
        let profil = antwort.profil();
        assert_eq!(profil.user_id, antwort.user_id);
        assert_eq!(profil.role, Rolle::Admin);
        assert_eq!(profil.phone.as_deref(), Some("1"));
    }

    #[test]
    fn fehlerkoerper_ohne_felder_kompakt() {
        let fehler = ApiFehler::neu(401, "Ungueltige Anmeldedaten");
        let json = serde_json::to_string(&fehler).unwrap();
        assert!(json.contains("\"code\":401"));
        assert!(!json.contains("fields"), "Leere Feldliste faellt weg");
    }

    #[test]
    fn fehlerkoerper_mit_feldern_roundtrip() {
        let fehler = ApiFehler::mit_feldern(
            422,
            "Eingabe ungueltig",
            vec![FeldFehler {
                field: "email".into(),
                message: "E-Mail fehlt".into(),
            }],
        );
        let json = serde_json::to_string(&fehler).unwrap();
        let zurueck: ApiFehler = serde_json::from_str(&json).unwrap();
        assert_eq!(zurueck.error.fields.len(), 1);
        assert_eq!(zurueck.error.fields[0].field, "email");
    }
}
