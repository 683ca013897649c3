//! pharmalager-db – Credential-Store
//!
//! Repository-Pattern ueber SQLite (sqlx). Haelt die Benutzertabelle
//! mit Passwort-Hashes; die Eindeutigkeit der (normalisierten) E-Mail
//! wird durch einen UNIQUE-Constraint der Datenbank erzwungen, nicht
//! nur durch Vorab-Pruefungen im Service.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use models::{BenutzerRecord, NeuerBenutzer};
pub use repository::{DatabaseConfig, UserRepository};
pub use sqlite::SqliteDb;
