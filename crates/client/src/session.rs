//! Session-Zustandsmaschine des Frontends
//!
//! Zustaende: Laden (nur beim Start, wird nie wieder betreten),
//! Anonym, Angemeldet. Token und Profil werden immer zusammen gesetzt
//! und zusammen geloescht. Sitzungsaendernde Aufrufe (anmelden,
//! registrieren, abmelden) laufen durch einen gemeinsamen Mutex und
//! sind damit serialisiert – ein zweiter Aufruf wartet, statt
//! Speicher-Schreibvorgaenge zu verschraenken.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use pharmalager_core::Rolle;
use pharmalager_protocol::{AuthAntwort, BenutzerProfil, LoginRequest, RegistrierenRequest};

use crate::api::AuthApi;
use crate::fehler::ClientFehler;
use crate::speicher::Speicher;

/// Schluessel der dauerhaften Eintraege
pub mod schluessel {
    pub const TOKEN: &str = "pharmalager.token";
    pub const PROFIL: &str = "pharmalager.profil";
    pub const LETZTE_ADMIN_ABMELDUNG: &str = "pharmalager.letzte_admin_abmeldung";
}

/// Sichtbarer Zustand der Session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionZustand {
    /// Startzustand bis `starten()` gelaufen ist
    Laden,
    Anonym,
    Angemeldet,
}

struct SessionDaten {
    zustand: SessionZustand,
    token: Option<String>,
    profil: Option<BenutzerProfil>,
}

/// Client-seitiger Halter der Sitzung
pub struct SessionClient<A: AuthApi, S: Speicher> {
    api: A,
    speicher: S,
    daten: Mutex<SessionDaten>,
}

impl<A: AuthApi, S: Speicher> SessionClient<A, S> {
    pub fn neu(api: A, speicher: S) -> Self {
        Self {
            api,
            speicher,
            daten: Mutex::new(SessionDaten {
                zustand: SessionZustand::Laden,
                token: None,
                profil: None,
            }),
        }
    }

    /// Stellt eine frueher persistierte Sitzung wieder her.
    ///
    /// Laeuft genau einmal beim Start: sind Token UND Profil vorhanden
    /// und parsebar (und das Token nicht offensichtlich abgelaufen),
    /// geht es nach Angemeldet, sonst werden Reste entfernt und der
    /// Zustand ist Anonym. Kaputter lokaler Zustand darf den Start nie
    /// scheitern lassen.
    pub async fn starten(&self) -> SessionZustand {
        let mut daten = self.daten.lock().await;
        if daten.zustand != SessionZustand::Laden {
            return daten.zustand;
        }

        let token = self.speicher.lesen(schluessel::TOKEN);
        let profil_json = self.speicher.lesen(schluessel::PROFIL);

        let wiederhergestellt = match (token, profil_json) {
            (Some(token), Some(json)) => match serde_json::from_str::<BenutzerProfil>(&json) {
                Ok(profil) if !token_offensichtlich_abgelaufen(&token) => Some((token, profil)),
                Ok(_) => {
                    tracing::debug!("Gespeichertes Token abgelaufen, starte anonym");
                    None
                }
                Err(e) => {
                    tracing::warn!(fehler = %e, "Gespeichertes Profil unlesbar, verwerfe Sitzung");
                    None
                }
            },
            _ => None,
        };

        match wiederhergestellt {
            Some((token, profil)) => {
                daten.token = Some(token);
                daten.profil = Some(profil);
                daten.zustand = SessionZustand::Angemeldet;
            }
            None => {
                // Halbe Sitzungen (nur Token oder nur Profil) raeumen wir weg
                let _ = self.speicher.entfernen(schluessel::TOKEN);
                let _ = self.speicher.entfernen(schluessel::PROFIL);
                daten.zustand = SessionZustand::Anonym;
            }
        }

        daten.zustand
    }

    /// Login; bei Erfolg wird {Token, Profil} persistiert und der
    /// Zustand ist Angemeldet. Bei Fehlern bleibt der Zustand wie er
    /// war, zurueck kommt eine Meldung fuer die Oberflaeche.
    pub async fn anmelden(&self, email: &str, passwort: &str) -> Result<BenutzerProfil, String> {
        let mut daten = self.daten.lock().await;

        let antwort = self
            .api
            .anmelden(&LoginRequest {
                email: email.to_string(),
                password: passwort.to_string(),
            })
            .await
            .map_err(|e| e.nachricht_fuer_benutzer())?;

        self.sitzung_setzen(&mut daten, antwort)
            .map_err(|e| e.nachricht_fuer_benutzer())
    }

    /// Registrierung; fehlt die Rolle, wird Customer gesetzt.
    /// Vertrag sonst wie `anmelden`.
    pub async fn registrieren(
        &self,
        mut anfrage: RegistrierenRequest,
    ) -> Result<BenutzerProfil, String> {
        let mut daten = self.daten.lock().await;

        anfrage.role.get_or_insert(Rolle::Customer);

        let antwort = self
            .api
            .registrieren(&anfrage)
            .await
            .map_err(|e| e.nachricht_fuer_benutzer())?;

        self.sitzung_setzen(&mut daten, antwort)
            .map_err(|e| e.nachricht_fuer_benutzer())
    }

    /// Abmeldung: bei erhoehter Rolle wird zuerst der Zeitstempel der
    /// letzten Admin-Abmeldung geschrieben, dann werden Token und
    /// Profil gemeinsam entfernt.
    pub async fn abmelden(&self) -> Result<(), String> {
        let mut daten = self.daten.lock().await;

        let erhoeht = daten
            .profil
            .as_ref()
            .map(|p| p.role.ist_erhoeht())
            .unwrap_or(false);
        if erhoeht {
            let jetzt = Utc::now().to_rfc3339();
            self.speicher
                .schreiben(schluessel::LETZTE_ADMIN_ABMELDUNG, &jetzt)
                .map_err(|e| e.nachricht_fuer_benutzer())?;
        }

        let _ = self.speicher.entfernen(schluessel::TOKEN);
        let _ = self.speicher.entfernen(schluessel::PROFIL);
        daten.token = None;
        daten.profil = None;
        daten.zustand = SessionZustand::Anonym;

        tracing::debug!(erhoeht, "Sitzung beendet");
        Ok(())
    }

    /// Aktueller Zustand
    pub async fn zustand(&self) -> SessionZustand {
        self.daten.lock().await.zustand
    }

    /// Profil des angemeldeten Benutzers
    pub async fn profil(&self) -> Option<BenutzerProfil> {
        self.daten.lock().await.profil.clone()
    }

    /// Token fuer Authorization-Header
    pub async fn token(&self) -> Option<String> {
        self.daten.lock().await.token.clone()
    }

    /// Hat der angemeldete Benutzer eine erhoehte Rolle?
    /// (Admin oder Pharmacist – steuert die Admin-Ansichten)
    pub async fn ist_admin(&self) -> bool {
        self.daten
            .lock()
            .await
            .profil
            .as_ref()
            .map(|p| p.role.ist_erhoeht())
            .unwrap_or(false)
    }

    /// Zeitpunkt der letzten Abmeldung eines erhoehten Benutzers.
    /// Rein informativ, nie Grundlage einer Zugriffskontrolle.
    pub fn letzte_admin_abmeldung(&self) -> Option<DateTime<Utc>> {
        self.speicher
            .lesen(schluessel::LETZTE_ADMIN_ABMELDUNG)
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Persistiert {Token, Profil} zusammen und setzt Angemeldet
    fn sitzung_setzen(
        &self,
        daten: &mut SessionDaten,
        antwort: AuthAntwort,
    ) -> Result<BenutzerProfil, ClientFehler> {
        let profil = antwort.profil();
        let profil_json =
            serde_json::to_string(&profil).map_err(|e| ClientFehler::Speicher(e.to_string()))?;

        self.speicher.schreiben(schluessel::TOKEN, &antwort.token)?;
        self.speicher.schreiben(schluessel::PROFIL, &profil_json)?;

        daten.token = Some(antwort.token);
        daten.profil = Some(profil.clone());
        daten.zustand = SessionZustand::Angemeldet;

        tracing::debug!(user_id = %profil.user_id, "Sitzung gesetzt");
        Ok(profil)
    }
}

/// Unverifizierter Blick auf den `exp`-Claim des gespeicherten Tokens.
///
/// Reine UX-Verbesserung beim Start – die massgebliche Pruefung macht
/// der Server bei jeder Anfrage. Nicht parsebare Tokens gelten als
/// nicht-abgelaufen und laufen gegen den Server.
fn token_offensichtlich_abgelaufen(token: &str) -> bool {
    use base64::Engine as _;

    let Some(payload_b64) = token.split('.').nth(1) else {
        return false;
    };
    let Ok(bytes) = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(payload_b64) else {
        return false;
    };
    let Ok(wert) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
        return false;
    };

    match wert.get("exp").and_then(|e| e.as_i64()) {
        Some(exp) => exp < Utc::now().timestamp(),
        None => false,
    }
}
