pub mod auth_routes;
pub mod navigation_routes;
pub mod place_routes;
pub mod recording_routes;
