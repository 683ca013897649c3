//! JWT-Ausstellung und -Verifikation
//!
//! Kompakte, selbst-beschreibende Tokens (HS256, symmetrisches
//! Geheimnis). Die Verifikation prueft Signatur, Issuer, Audience und
//! Ablauf; ein Token dessen Header einen anderen Algorithmus angibt
//! wird vor der Signaturpruefung abgelehnt.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pharmalager_core::{Rolle, UserId};

use crate::error::{AuthError, AuthResult};

/// Konfiguration des JWT-Ausstellers
///
/// Explizit konstruiert und per Referenz gehalten – kein verstecktes
/// globales Geheimnis.
#[derive(Debug, Clone)]
pub struct JwtKonfig {
    /// Symmetrisches Signier-Geheimnis (Issuer und Verifier teilen es)
    pub geheimnis: String,
    /// `iss`-Claim
    pub aussteller: String,
    /// `aud`-Claim
    pub zielgruppe: String,
    /// Token-Lebensdauer in Minuten
    pub gueltigkeit_minuten: i64,
}

impl Default for JwtKonfig {
    fn default() -> Self {
        Self {
            geheimnis: String::new(),
            aussteller: "pharmalager".into(),
            zielgruppe: "pharmalager-spa".into(),
            gueltigkeit_minuten: 60,
        }
    }
}

/// Claim-Set eines ausgestellten Tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Benutzer-ID (UUID-String)
    pub sub: String,
    pub email: String,
    /// Wire-String der Rolle ("Customer" / "Pharmacist" / "Admin")
    pub role: String,
    /// Eindeutige Token-ID (frische UUID pro Ausstellung)
    pub jti: String,
    /// Ausgestellt am (Unix-Sekunden)
    pub iat: i64,
    /// Laeuft ab am (iat + gueltigkeit_minuten * 60)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Benutzer-ID aus dem `sub`-Claim
    pub fn user_id(&self) -> AuthResult<UserId> {
        self.sub.parse().map_err(|_| AuthError::TokenUngueltig)
    }

    /// Rolle aus dem `role`-Claim
    pub fn rolle(&self) -> AuthResult<Rolle> {
        self.role.parse().map_err(|_| AuthError::TokenUngueltig)
    }
}

/// Stellt JWTs aus und verifiziert sie
pub struct JwtService {
    konfig: JwtKonfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn neu(konfig: JwtKonfig) -> Self {
        let encoding_key = EncodingKey::from_secret(konfig.geheimnis.as_bytes());
        let decoding_key = DecodingKey::from_secret(konfig.geheimnis.as_bytes());
        Self {
            konfig,
            encoding_key,
            decoding_key,
        }
    }

    /// Stellt ein Token fuer die gegebene Identitaet aus.
    ///
    /// Deterministische Claim-Form; nur `jti`, `iat` und `exp`
    /// variieren zwischen Aufrufen.
    pub fn ausstellen(&self, user_id: UserId, email: &str, rolle: Rolle) -> AuthResult<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: rolle.als_str().to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + self.konfig.gueltigkeit_minuten * 60,
            iss: self.konfig.aussteller.clone(),
            aud: self.konfig.zielgruppe.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Intern(format!("Token-Ausstellung fehlgeschlagen: {e}")))
    }

    /// Verifiziert ein Token und gibt die Claims zurueck.
    ///
    /// Jeder Fehlgrund (Signatur, Algorithmus, Issuer, Audience,
    /// Ablauf, Format) wird einheitlich zu `TokenUngueltig` – die
    /// HTTP-Schicht unterscheidet die Faelle bewusst nicht.
    pub fn verifizieren(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.konfig.aussteller]);
        validation.set_audience(&[&self.konfig.zielgruppe]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|daten| daten.claims)
            .map_err(|_| AuthError::TokenUngueltig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_konfig() -> JwtKonfig {
        JwtKonfig {
            geheimnis: "test-geheimnis-mindestens-32-zeichen!".into(),
            aussteller: "pharmalager".into(),
            zielgruppe: "pharmalager-spa".into(),
            gueltigkeit_minuten: 30,
        }
    }

    #[test]
    fn ausstellen_und_verifizieren() {
        let service = JwtService::neu(test_konfig());
        let user_id = UserId::new();

        let token = service
            .ausstellen(user_id, "anna@apotheke.de", Rolle::Customer)
            .expect("Ausstellung fehlgeschlagen");

        let claims = service.verifizieren(&token).expect("Verifikation fehlgeschlagen");
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "anna@apotheke.de");
        assert_eq!(claims.rolle().unwrap(), Rolle::Customer);
        assert_eq!(claims.iss, "pharmalager");
        assert_eq!(claims.aud, "pharmalager-spa");
    }

    #[test]
    fn ablauf_ist_iat_plus_konfiguration() {
        let service = JwtService::neu(test_konfig());
        let token = service
            .ausstellen(UserId::new(), "a@x.de", Rolle::Admin)
            .unwrap();
        let claims = service.verifizieren(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn jti_pro_ausstellung_frisch() {
        let service = JwtService::neu(test_konfig());
        let user_id = UserId::new();
        let t1 = service.ausstellen(user_id, "a@x.de", Rolle::Customer).unwrap();
        let t2 = service.ausstellen(user_id, "a@x.de", Rolle::Customer).unwrap();
        let c1 = service.verifizieren(&t1).unwrap();
        let c2 = service.verifizieren(&t2).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn falsches_geheimnis_abgelehnt() {
        let service = JwtService::neu(test_konfig());
        let token = service.ausstellen(UserId::new(), "a@x.de", Rolle::Customer).unwrap();

        let anderer = JwtService::neu(JwtKonfig {
            geheimnis: "ein-voellig-anderes-geheimnis-123456".into(),
            ..test_konfig()
        });
        assert!(matches!(
            anderer.verifizieren(&token),
            Err(AuthError::TokenUngueltig)
        ));
    }

    #[test]
    fn falscher_issuer_abgelehnt() {
        let service = JwtService::neu(test_konfig());
        let token = service.ausstellen(UserId::new(), "a@x.de", Rolle::Customer).unwrap();

        let anderer = JwtService::neu(JwtKonfig {
            aussteller: "fremder-dienst".into(),
            ..test_konfig()
        });
        assert!(anderer.verifizieren(&token).is_err());
    }

    #[test]
    fn falsche_audience_abgelehnt() {
        let service = JwtService::neu(test_konfig());
        let token = service.ausstellen(UserId::new(), "a@x.de", Rolle::Customer).unwrap();

        let anderer = JwtService::neu(JwtKonfig {
            zielgruppe: "andere-app".into(),
            ..test_konfig()
        });
        assert!(anderer.verifizieren(&token).is_err());
    }

    #[test]
    fn abgelaufenes_token_abgelehnt() {
        // Negativ konfigurierte Lebensdauer -> exp liegt weit in der
        // Vergangenheit, jenseits der Standard-Leeway
        let service = JwtService::neu(JwtKonfig {
            gueltigkeit_minuten: -10,
            ..test_konfig()
        });
        let token = service.ausstellen(UserId::new(), "a@x.de", Rolle::Customer).unwrap();
        assert!(matches!(
            service.verifizieren(&token),
            Err(AuthError::TokenUngueltig)
        ));
    }

    #[test]
    fn anderer_algorithmus_abgelehnt() {
        // Gleiches Geheimnis, aber HS384 im Header: die Verifikation
        // pinnt HS256 und lehnt vor der Signaturpruefung ab
        let konfig = test_konfig();
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::new().to_string(),
            email: "a@x.de".into(),
            role: "Customer".into(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + 600,
            iss: konfig.aussteller.clone(),
            aud: konfig.zielgruppe.clone(),
        };
        let fremd = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(konfig.geheimnis.as_bytes()),
        )
        .unwrap();

        let service = JwtService::neu(konfig);
        assert!(matches!(
            service.verifizieren(&fremd),
            Err(AuthError::TokenUngueltig)
        ));
    }

    #[test]
    fn muell_statt_token_abgelehnt() {
        let service = JwtService::neu(test_konfig());
        assert!(service.verifizieren("kein.echtes.token").is_err());
        assert!(service.verifizieren("").is_err());
    }
}
