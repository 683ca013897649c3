//! Passwort-Hashing mit Argon2id
//!
//! Kostenfaktor ist fest und nicht pro Aufruf einstellbar; Werte
//! entsprechen der OWASP-Minimalempfehlung fuer Argon2id:
//! m=19 MiB, t=2, p=1.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AuthError;

/// m_cost in KiB (19 MiB)
const M_COST_KIB: u32 = 19 * 1024;
/// Iterationen
const T_COST: u32 = 2;
/// Parallelismus
const P_COST: u32 = 1;

/// Fester Dummy-Hash mit denselben Kostenparametern wie echte Hashes.
///
/// Wird beim Login gegen unbekannte E-Mails verifiziert, damit beide
/// Fehlpfade (unbekannte E-Mail, falsches Passwort) eine
/// Argon2-Verifikation kosten und zeitlich ununterscheidbar bleiben.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$YWJjZGVmZ2hpamtsbW5vcHFyc3R1dnd4eXowMTIzNDU";

fn argon2_instanz() -> Argon2<'static> {
    let params = Params::new(M_COST_KIB, T_COST, P_COST, None)
        .expect("Argon2-Parameter ungueltig");
    Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
}

/// Hasht ein Passwort mit Argon2id und einem frischen Salt (OsRng).
///
/// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2_instanz()
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash.
///
/// Nicht-Uebereinstimmung ist `Ok(false)`; nur kaputte Hashes sind
/// Fehler. Der Vergleich selbst laeuft in der Argon2-Implementierung
/// in konstanter Zeit.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

    match argon2_instanz().verify_password(passwort.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashen_und_verifizieren() {
        let passwort = "rezeptpflichtig!23";
        let hash = passwort_hashen(passwort).expect("Hashing fehlgeschlagen");

        assert!(hash.starts_with("$argon2id$"), "PHC-Format erwartet");
        assert!(passwort_verifizieren(passwort, &hash).unwrap());
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hash = passwort_hashen("richtig").unwrap();
        assert!(!passwort_verifizieren("falsch", &hash).unwrap());
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hash1 = passwort_hashen("gleich").unwrap();
        let hash2 = passwort_hashen("gleich").unwrap();
        assert_ne!(hash1, hash2, "Frisches Salt pro Aufruf");
    }

    #[test]
    fn kaputter_hash_gibt_fehler() {
        let ergebnis = passwort_verifizieren("egal", "kein_phc_string");
        assert!(matches!(ergebnis, Err(AuthError::PasswortHashing(_))));
    }

    #[test]
    fn dummy_hash_ist_parsebar_und_lehnt_ab() {
        // Muss parsen und jedes Passwort ablehnen, darf aber nie Err sein
        assert!(!passwort_verifizieren("beliebig", DUMMY_HASH).unwrap());
    }

    #[test]
    fn dummy_hash_traegt_gleiche_kosten() {
        assert!(DUMMY_HASH.contains("m=19456,t=2,p=1"));
    }
}
