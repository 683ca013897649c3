//! Auth-Service fuer Pharmalager
//!
//! Zentraler Service fuer Registrierung und Login. Orchestriert
//! Credential-Store, Passwort-Hashing und JWT-Ausstellung. Beide
//! Operationen sind request-scoped; Login ist rein lesend.

use std::sync::Arc;

use pharmalager_core::{email_normalisieren, Rolle, UserId};
use pharmalager_db::{
    models::{BenutzerRecord, NeuerBenutzer},
    repository::UserRepository,
};

use crate::{
    error::{AuthError, AuthResult, FeldFehler},
    password::{passwort_hashen, passwort_verifizieren, DUMMY_HASH},
    token::JwtService,
};

/// Eingabedaten der Registrierung
#[derive(Debug, Clone)]
pub struct RegistrierungsDaten {
    pub full_name: String,
    pub email: String,
    pub passwort: String,
    pub phone: Option<String>,
    /// Fehlt die Rolle, gilt Customer
    pub rolle: Option<Rolle>,
}

/// Auth-Service – zentraler Einstiegspunkt fuer Registrierung und Login
pub struct AuthService<U: UserRepository> {
    user_repo: Arc<U>,
    jwt: Arc<JwtService>,
}

impl<U: UserRepository> AuthService<U> {
    /// Erstellt einen neuen AuthService
    pub fn neu(user_repo: Arc<U>, jwt: Arc<JwtService>) -> Self {
        Self { user_repo, jwt }
    }

    /// Registriert einen neuen Benutzer und stellt sofort ein Token aus.
    ///
    /// Prueft erst die Eingabe, dann die E-Mail-Eindeutigkeit. Der
    /// UNIQUE-Constraint der Datenbank faengt parallele Registrierungen
    /// mit derselben E-Mail; beide Pfade melden `EmailVergeben`.
    pub async fn registrieren(
        &self,
        daten: RegistrierungsDaten,
    ) -> AuthResult<(BenutzerRecord, String)> {
        let fehler = eingabe_pruefen(&daten);
        if !fehler.is_empty() {
            return Err(AuthError::Validierung(fehler));
        }

        let email = email_normalisieren(&daten.email);

        if self.user_repo.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailVergeben(email));
        }

        let passwort_hash = passwort_hashen(&daten.passwort)?;
        let rolle = daten.rolle.unwrap_or_default();

        let benutzer = self
            .user_repo
            .create(NeuerBenutzer {
                email: &email,
                password_hash: &passwort_hash,
                full_name: daten.full_name.trim(),
                phone: daten.phone.as_deref(),
                rolle,
            })
            .await
            .map_err(|e| {
                if e.ist_eindeutigkeit() {
                    // Parallele Registrierung hat das Rennen gewonnen
                    AuthError::EmailVergeben(email.clone())
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        let token = self
            .jwt
            .ausstellen(UserId(benutzer.id), &benutzer.email, benutzer.rolle)?;

        tracing::info!(
            user_id = %benutzer.id,
            rolle = %benutzer.rolle,
            "Neuer Benutzer registriert"
        );

        Ok((benutzer, token))
    }

    /// Meldet einen Benutzer an und stellt ein frisches Token aus.
    ///
    /// Unbekannte E-Mail und falsches Passwort sind fuer den Aufrufer
    /// ununterscheidbar: gleicher Fehler, und auch der unbekannte-E-Mail-
    /// Pfad kostet eine Argon2-Verifikation (gegen `DUMMY_HASH`).
    pub async fn anmelden(
        &self,
        email: &str,
        passwort: &str,
    ) -> AuthResult<(BenutzerRecord, String)> {
        let email = email_normalisieren(email);
        let benutzer = self.user_repo.get_by_email(&email).await?;

        let hash = benutzer
            .as_ref()
            .map(|b| b.password_hash.as_str())
            .unwrap_or(DUMMY_HASH);
        let korrekt = passwort_verifizieren(passwort, hash)?;

        match benutzer {
            Some(benutzer) if korrekt => {
                let token = self
                    .jwt
                    .ausstellen(UserId(benutzer.id), &benutzer.email, benutzer.rolle)?;
                tracing::info!(user_id = %benutzer.id, "Benutzer angemeldet");
                Ok((benutzer, token))
            }
            _ => {
                tracing::warn!(email = %email, "Fehlgeschlagener Login-Versuch");
                Err(AuthError::UngueltigeAnmeldedaten)
            }
        }
    }

    /// Zugriff auf den Token-Dienst (fuer die Verifikation in der HTTP-Schicht)
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}

/// Prueft die Registrierungseingabe; Feldnamen sind die Wire-Namen
fn eingabe_pruefen(daten: &RegistrierungsDaten) -> Vec<FeldFehler> {
    let mut fehler = Vec::new();

    if daten.full_name.trim().is_empty() {
        fehler.push(FeldFehler::neu("fullName", "Name darf nicht leer sein"));
    }

    let email = daten.email.trim();
    if email.is_empty() {
        fehler.push(FeldFehler::neu("email", "E-Mail darf nicht leer sein"));
    } else if !email_plausibel(email) {
        fehler.push(FeldFehler::neu("email", "E-Mail-Adresse ist ungueltig"));
    }

    if daten.passwort.is_empty() {
        fehler.push(FeldFehler::neu("password", "Passwort darf nicht leer sein"));
    }

    fehler
}

/// Grobe Plausibilitaetspruefung – die eigentliche Verifikation der
/// Adresse passiert ausserhalb dieses Systems
fn email_plausibel(email: &str) -> bool {
    match email.split_once('@') {
        Some((lokal, domain)) => {
            !lokal.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;
    use pharmalager_db::{DbError, DbResult};
    use uuid::Uuid;

    use crate::token::JwtKonfig;

    // Minimaler In-Memory UserRepository fuer Tests; bildet den
    // UNIQUE-Constraint der echten Tabelle nach
    #[derive(Default)]
    struct TestUserRepo {
        benutzer: Mutex<Vec<BenutzerRecord>>,
    }

    impl UserRepository for TestUserRepo {
        async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
            let mut benutzer = self.benutzer.lock().unwrap();
            if benutzer.iter().any(|b| b.email == data.email) {
                return Err(DbError::Eindeutigkeit(format!(
                    "E-Mail '{}' bereits vergeben",
                    data.email
                )));
            }
            let record = BenutzerRecord {
                id: Uuid::new_v4(),
                email: data.email.to_string(),
                password_hash: data.password_hash.to_string(),
                full_name: data.full_name.to_string(),
                phone: data.phone.map(str::to_string),
                rolle: data.rolle,
                created_at: Utc::now(),
            };
            benutzer.push(record.clone());
            Ok(record)
        }

        async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
            Ok(self
                .benutzer
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.id == id)
                .cloned())
        }

        async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
            Ok(self
                .benutzer
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.email == email)
                .cloned())
        }

        async fn anzahl(&self) -> DbResult<u64> {
            Ok(self.benutzer.lock().unwrap().len() as u64)
        }
    }

    fn test_service() -> AuthService<TestUserRepo> {
        let repo = Arc::new(TestUserRepo::default());
        let jwt = Arc::new(JwtService::neu(JwtKonfig {
            geheimnis: "test-geheimnis-mindestens-32-zeichen!".into(),
            ..JwtKonfig::default()
        }));
        AuthService::neu(repo, jwt)
    }

    fn registrierung(email: &str) -> RegistrierungsDaten {
        RegistrierungsDaten {
            full_name: "Anna Muster".into(),
            email: email.into(),
            passwort: "sicheres_passwort!".into(),
            phone: None,
            rolle: None,
        }
    }

    #[tokio::test]
    async fn registrieren_und_anmelden() {
        let service = test_service();

        let (benutzer, token) = service
            .registrieren(registrierung("anna@apotheke.de"))
            .await
            .expect("Registrierung fehlgeschlagen");

        assert_eq!(benutzer.email, "anna@apotheke.de");
        assert_eq!(benutzer.rolle, Rolle::Customer, "Standardrolle");
        assert!(!token.is_empty());

        let (angemeldeter, _token) = service
            .anmelden("anna@apotheke.de", "sicheres_passwort!")
            .await
            .expect("Anmeldung fehlgeschlagen");

        assert_eq!(angemeldeter.id, benutzer.id);
        assert_eq!(angemeldeter.rolle, benutzer.rolle);
    }

    #[tokio::test]
    async fn doppelte_email_schlaegt_fehl_ohne_schreibvorgang() {
        let service = test_service();
        service.registrieren(registrierung("doppelt@apotheke.de")).await.unwrap();

        let vorher = service.user_repo.anzahl().await.unwrap();
        let ergebnis = service.registrieren(registrierung("doppelt@apotheke.de")).await;

        assert!(matches!(ergebnis, Err(AuthError::EmailVergeben(_))));
        assert_eq!(service.user_repo.anzahl().await.unwrap(), vorher);
    }

    #[tokio::test]
    async fn email_eindeutigkeit_ignoriert_schreibweise() {
        let service = test_service();
        service.registrieren(registrierung("Gross@Apotheke.DE")).await.unwrap();

        let ergebnis = service.registrieren(registrierung("gross@apotheke.de")).await;
        assert!(matches!(ergebnis, Err(AuthError::EmailVergeben(_))));

        // Login klappt mit beliebiger Schreibweise
        let (benutzer, _) = service
            .anmelden("  GROSS@APOTHEKE.DE ", "sicheres_passwort!")
            .await
            .unwrap();
        assert_eq!(benutzer.email, "gross@apotheke.de");
    }

    #[tokio::test]
    async fn fehlpfade_sind_ununterscheidbar() {
        let service = test_service();
        service.registrieren(registrierung("echt@apotheke.de")).await.unwrap();

        let falsches_passwort = service
            .anmelden("echt@apotheke.de", "voellig_falsch")
            .await
            .unwrap_err();
        let unbekannte_email = service
            .anmelden("niemand@apotheke.de", "voellig_falsch")
            .await
            .unwrap_err();

        assert!(matches!(falsches_passwort, AuthError::UngueltigeAnmeldedaten));
        assert!(matches!(unbekannte_email, AuthError::UngueltigeAnmeldedaten));
        assert_eq!(falsches_passwort.to_string(), unbekannte_email.to_string());
    }

    #[tokio::test]
    async fn token_claims_passen_zur_identitaet() {
        let service = test_service();
        let (benutzer, token) = service
            .registrieren(RegistrierungsDaten {
                rolle: Some(Rolle::Pharmacist),
                ..registrierung("petra@apotheke.de")
            })
            .await
            .unwrap();

        let claims = service.jwt().verifizieren(&token).unwrap();
        assert_eq!(claims.user_id().unwrap().inner(), benutzer.id);
        assert_eq!(claims.email, "petra@apotheke.de");
        assert_eq!(claims.rolle().unwrap(), Rolle::Pharmacist);
    }

    #[tokio::test]
    async fn validierung_sammelt_feldfehler() {
        let service = test_service();
        let ergebnis = service
            .registrieren(RegistrierungsDaten {
                full_name: "   ".into(),
                email: "keine-adresse".into(),
                passwort: "".into(),
                phone: None,
                rolle: None,
            })
            .await;

        match ergebnis {
            Err(AuthError::Validierung(fehler)) => {
                let felder: Vec<&str> = fehler.iter().map(|f| f.feld.as_str()).collect();
                assert!(felder.contains(&"fullName"));
                assert!(felder.contains(&"email"));
                assert!(felder.contains(&"password"));
            }
            other => panic!("Validierungsfehler erwartet, erhalten: {other:?}"),
        }
    }

    #[tokio::test]
    async fn keine_persistenz_bei_validierungsfehler() {
        let service = test_service();
        let _ = service
            .registrieren(RegistrierungsDaten {
                passwort: "".into(),
                ..registrierung("valide@apotheke.de")
            })
            .await;
        assert_eq!(service.user_repo.anzahl().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn kompletter_ablauf_neuer_kunde() {
        let service = test_service();

        // Registrierung ohne Rollenangabe -> Customer
        let (benutzer, _) = service
            .registrieren(RegistrierungsDaten {
                full_name: "A".into(),
                email: "a@x.com".into(),
                passwort: "p1".into(),
                phone: None,
                rolle: None,
            })
            .await
            .unwrap();
        assert_eq!(benutzer.rolle, Rolle::Customer);

        // Zweite Registrierung derselben E-Mail
        let doppelt = service
            .registrieren(RegistrierungsDaten {
                full_name: "B".into(),
                email: "a@x.com".into(),
                passwort: "p2".into(),
                phone: None,
                rolle: None,
            })
            .await;
        assert!(matches!(doppelt, Err(AuthError::EmailVergeben(_))));

        // Falsches Passwort
        let falsch = service.anmelden("a@x.com", "wrong").await;
        assert!(matches!(falsch, Err(AuthError::UngueltigeAnmeldedaten)));

        // Korrektes Passwort -> Token mit Customer-Rolle
        let (_, token) = service.anmelden("a@x.com", "p1").await.unwrap();
        let claims = service.jwt().verifizieren(&token).unwrap();
        assert_eq!(claims.role, "Customer");
    }

    #[test]
    fn email_plausibilitaet() {
        assert!(email_plausibel("a@x.com"));
        assert!(email_plausibel("vorname.nachname@sub.domain.de"));
        assert!(!email_plausibel("ohne-at"));
        assert!(!email_plausibel("@leer.de"));
        assert!(!email_plausibel("lokal@"));
        assert!(!email_plausibel("lokal@ohnepunkt"));
        assert!(!email_plausibel("lokal@endet."));
    }
}
