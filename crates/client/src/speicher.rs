//! Dauerhafter Key-Value-Speicher des Clients
//!
//! Abstraktion ueber das, was im Browser localStorage waere: einfache
//! String-Eintraege, synchron, ohne Ablauf-Logik. `DateiSpeicher`
//! persistiert als JSON-Datei, `MemorySpeicher` dient Tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::fehler::ClientFehler;

/// Schnittstelle fuer dauerhafte Client-Eintraege
pub trait Speicher: Send + Sync {
    /// Liest einen Eintrag; `None` wenn nicht vorhanden
    fn lesen(&self, schluessel: &str) -> Option<String>;

    /// Schreibt einen Eintrag (ueberschreibt vorhandene)
    fn schreiben(&self, schluessel: &str, wert: &str) -> Result<(), ClientFehler>;

    /// Entfernt einen Eintrag; fehlende Eintraege sind kein Fehler
    fn entfernen(&self, schluessel: &str) -> Result<(), ClientFehler>;
}

impl<S: Speicher> Speicher for std::sync::Arc<S> {
    fn lesen(&self, schluessel: &str) -> Option<String> {
        (**self).lesen(schluessel)
    }

    fn schreiben(&self, schluessel: &str, wert: &str) -> Result<(), ClientFehler> {
        (**self).schreiben(schluessel, wert)
    }

    fn entfernen(&self, schluessel: &str) -> Result<(), ClientFehler> {
        (**self).entfernen(schluessel)
    }
}

/// JSON-Datei-gestuetzter Speicher
///
/// Laedt die Datei einmal beim Oeffnen und schreibt sie bei jeder
/// Aenderung vollstaendig zurueck (die Eintraege sind klein).
pub struct DateiSpeicher {
    pfad: PathBuf,
    eintraege: Mutex<HashMap<String, String>>,
}

impl DateiSpeicher {
    /// Oeffnet den Speicher; eine fehlende Datei ergibt einen leeren
    /// Speicher, eine unlesbare Datei wird verworfen (Neustart darf
    /// nie an kaputtem lokalem Zustand scheitern)
    pub fn oeffnen(pfad: impl Into<PathBuf>) -> Self {
        let pfad = pfad.into();
        let eintraege = match std::fs::read_to_string(&pfad) {
            Ok(inhalt) => serde_json::from_str(&inhalt).unwrap_or_else(|e| {
                tracing::warn!(pfad = %pfad.display(), fehler = %e, "Speicherdatei unlesbar, verwerfe Inhalt");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            pfad,
            eintraege: Mutex::new(eintraege),
        }
    }

    fn sichern(&self, eintraege: &HashMap<String, String>) -> Result<(), ClientFehler> {
        let json = serde_json::to_string_pretty(eintraege)
            .map_err(|e| ClientFehler::Speicher(e.to_string()))?;
        std::fs::write(&self.pfad, json).map_err(|e| ClientFehler::Speicher(e.to_string()))
    }
}

impl Speicher for DateiSpeicher {
    fn lesen(&self, schluessel: &str) -> Option<String> {
        self.eintraege.lock().unwrap().get(schluessel).cloned()
    }

    fn schreiben(&self, schluessel: &str, wert: &str) -> Result<(), ClientFehler> {
        let mut eintraege = self.eintraege.lock().unwrap();
        eintraege.insert(schluessel.to_string(), wert.to_string());
        self.sichern(&eintraege)
    }

    fn entfernen(&self, schluessel: &str) -> Result<(), ClientFehler> {
        let mut eintraege = self.eintraege.lock().unwrap();
        if eintraege.remove(schluessel).is_some() {
            self.sichern(&eintraege)?;
        }
        Ok(())
    }
}

/// In-Memory-Speicher fuer Tests
#[derive(Default)]
pub struct MemorySpeicher {
    eintraege: Mutex<HashMap<String, String>>,
}

impl MemorySpeicher {
    pub fn neu() -> Self {
        Self::default()
    }
}

impl Speicher for MemorySpeicher {
    fn lesen(&self, schluessel: &str) -> Option<String> {
        self.eintraege.lock().unwrap().get(schluessel).cloned()
    }

    fn schreiben(&self, schluessel: &str, wert: &str) -> Result<(), ClientFehler> {
        self.eintraege
            .lock()
            .unwrap()
            .insert(schluessel.to_string(), wert.to_string());
        Ok(())
    }

    fn entfernen(&self, schluessel: &str) -> Result<(), ClientFehler> {
        self.eintraege.lock().unwrap().remove(schluessel);
        Ok(())
    }
}
