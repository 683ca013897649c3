//! SQLite-Implementierung des Credential-Stores

mod pool;
mod users;

pub use pool::SqliteDb;
