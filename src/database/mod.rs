//! Módulo de base de datos
//!
//! Maneja la conexión y el esquema de SQLite

pub mod connection;

pub use connection::{connect_in_memory, create_pool};
