//! Controladores: reglas de negocio entre las rutas HTTP y los repositorios

pub mod auth_controller;
pub mod navigation_controller;
pub mod place_controller;
pub mod route_controller;
