//! Benutzerrollen
//!
//! Geschlossene Menge statt freier Strings, damit Rollenpruefungen
//! vom Compiler abgedeckt werden. Erweiterung = neue Variante hier
//! plus Wire-String in `als_str`/`FromStr`.

use serde::{Deserialize, Serialize};

/// Rolle eines Benutzers im System
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rolle {
    /// Standardrolle fuer neue Registrierungen
    Customer,
    /// Apotheker – erhoehte Rechte
    Pharmacist,
    /// Administrator – erhoehte Rechte
    Admin,
}

impl Rolle {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Pharmacist => "Pharmacist",
            Self::Admin => "Admin",
        }
    }

    /// Erhoehte Rolle? (steuert Admin-Ansichten und den
    /// Abmelde-Zeitstempel im Client)
    pub fn ist_erhoeht(&self) -> bool {
        matches!(self, Self::Pharmacist | Self::Admin)
    }
}

impl Default for Rolle {
    fn default() -> Self {
        Self::Customer
    }
}

impl std::fmt::Display for Rolle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

impl std::str::FromStr for Rolle {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(Self::Customer),
            "Pharmacist" => Ok(Self::Pharmacist),
            "Admin" => Ok(Self::Admin),
            other => Err(format!("Unbekannte Rolle: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ist_customer() {
        assert_eq!(Rolle::default(), Rolle::Customer);
    }

    #[test]
    fn wire_strings_roundtrip() {
        for rolle in [Rolle::Customer, Rolle::Pharmacist, Rolle::Admin] {
            let geparst: Rolle = rolle.als_str().parse().unwrap();
            assert_eq!(geparst, rolle);
        }
    }

    #[test]
    fn unbekannte_rolle_gibt_fehler() {
        assert!("Hausmeister".parse::<Rolle>().is_err());
        // Gross-/Kleinschreibung ist Teil des Wire-Formats
        assert!("customer".parse::<Rolle>().is_err());
    }

    #[test]
    fn erhoehte_rollen() {
        assert!(!Rolle::Customer.ist_erhoeht());
        assert!(Rolle::Pharmacist.ist_erhoeht());
        assert!(Rolle::Admin.ist_erhoeht());
    }
}
