use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Location, Place};

// Request para crear un lugar
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

// Response de lugar
#[derive(Debug, Serialize)]
pub struct PlaceResponse {
    pub id: i64,
    pub name: String,
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            name: place.name,
        }
    }
}

// Request para crear una ubicación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub floor: String,
    pub place_id: i64,
}

// Response al crear una ubicación
#[derive(Debug, Serialize)]
pub struct CreateLocationResponse {
    pub id: i64,
    pub message: String,
}

// Response de ubicación dentro de un lugar
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: i64,
    pub name: String,
    pub floor: String,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            floor: location.floor,
        }
    }
}

// Response del listado global, incluye el lugar al que pertenece
#[derive(Debug, Serialize)]
pub struct LocationDetailResponse {
    pub id: i64,
    pub name: String,
    pub floor: String,
    pub place_id: i64,
}

impl From<Location> for LocationDetailResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            floor: location.floor,
            place_id: location.place_id,
        }
    }
}
