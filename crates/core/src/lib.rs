//! pharmalager-core – Gemeinsame Typen
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die von allen
//! anderen Pharmalager-Crates verwendet werden:
//! - Identifikationstypen (Newtype-Pattern)
//! - Benutzerrollen
//! - E-Mail-Normalisierung

pub mod rolle;
pub mod types;

pub use rolle::Rolle;
pub use types::{email_normalisieren, UserId};
