//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, extracción
//! de peticiones y credenciales.

pub mod credentials;
pub mod errors;
pub mod extract;
