//! pharmalager-client – Session-Zustand des Frontends
//!
//! Haelt den angemeldeten Benutzer ({Token, Profil}) im Speicher und
//! in einem dauerhaften Key-Value-Speicher (Pendant zu localStorage).
//! Kernstueck ist der [`session::SessionClient`] mit den Zustaenden
//! Laden / Anonym / Angemeldet.

pub mod api;
pub mod fehler;
pub mod session;
pub mod speicher;

pub use api::{AuthApi, HttpAuthApi};
pub use fehler::ClientFehler;
pub use session::{SessionClient, SessionZustand};
pub use speicher::{DateiSpeicher, MemorySpeicher, Speicher};
