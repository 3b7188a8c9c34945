//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al esquema SQLite.

pub mod location;
pub mod place;
pub mod route;
pub mod user;

pub use location::Location;
pub use place::Place;
pub use route::{PathPoint, Route, RouteBody, RouteKind, RouteStep};
pub use user::User;
