//! Fehlertypen der Client-Seite
//!
//! Jede Fehlerquelle wird fuer die Oberflaeche auf genau einen
//! menschenlesbaren String reduziert (`nachricht_fuer_benutzer`).

use pharmalager_protocol::ApiFehler;

/// Generische Meldung wenn der Server nicht erreichbar ist
const TRANSPORT_MELDUNG: &str = "Server nicht erreichbar. Bitte spaeter erneut versuchen.";

/// Fehler die auf der Client-Seite auftreten koennen
#[derive(Debug)]
pub enum ClientFehler {
    /// Netzwerk/Transport (Server nicht erreichbar, Timeout, ...)
    Transport(String),
    /// Der Server hat mit einem Fehlerkoerper geantwortet
    Server { status: u16, fehler: ApiFehler },
    /// Lokaler Speicher nicht les-/schreibbar
    Speicher(String),
}

impl ClientFehler {
    /// Reduziert den Fehler auf eine Meldung fuer die Oberflaeche.
    ///
    /// Strukturierte Feldfehler werden zu einer Meldung verbunden;
    /// sonst gilt die Servermeldung, sonst ein generischer Fallback.
    pub fn nachricht_fuer_benutzer(&self) -> String {
        match self {
            Self::Transport(_) => TRANSPORT_MELDUNG.to_string(),
            Self::Server { fehler, .. } => {
                if !fehler.error.fields.is_empty() {
                    fehler
                        .error
                        .fields
                        .iter()
                        .map(|f| f.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                } else if !fehler.error.message.is_empty() {
                    fehler.error.message.clone()
                } else {
                    "Anfrage fehlgeschlagen.".to_string()
                }
            }
            Self::Speicher(msg) => format!("Lokaler Speicher fehlerhaft: {msg}"),
        }
    }
}

impl std::fmt::Display for ClientFehler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Transportfehler: {msg}"),
            Self::Server { status, fehler } => {
                write!(f, "Serverfehler {status}: {}", fehler.error.message)
            }
            Self::Speicher(msg) => write!(f, "Speicherfehler: {msg}"),
        }
    }
}

impl From<reqwest::Error> for ClientFehler {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
