//! pharmalager-auth – Auth-Service
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - JWT-Ausstellung und -Verifikation (HS256, Issuer/Audience/Ablauf)
//! - AuthService (Registrierung, Login)

pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult, FeldFehler};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::{AuthService, RegistrierungsDaten};
pub use token::{Claims, JwtKonfig, JwtService};
