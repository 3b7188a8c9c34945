//! Repositorios: acceso SQL a cada tabla

pub mod location_repository;
pub mod place_repository;
pub mod route_repository;
pub mod user_repository;
