// Database modules

pub mod connection;

pub use connection::{connect, DatabaseConfig, DatabaseError, DatabasePool};
