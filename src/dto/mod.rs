//! Objetos de transferencia de la API HTTP

pub mod auth_dto;
pub mod place_dto;
pub mod route_dto;
