use sqlx::SqlitePool;
use tracing::info;

use crate::dto::place_dto::{
    CreateLocationRequest, CreateLocationResponse, CreatePlaceRequest, LocationDetailResponse,
    LocationResponse, PlaceResponse,
};
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::place_repository::PlaceRepository;
use crate::utils::errors::{bad_request_error, conflict_error, invalid_reference_error, AppError};

/// Lugares y ubicaciones: la parte del almacén de entidades que usan los operadores
pub struct PlaceController {
    places: PlaceRepository,
    locations: LocationRepository,
}

impl PlaceController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            places: PlaceRepository::new(pool.clone()),
            locations: LocationRepository::new(pool),
        }
    }

    pub async fn create_place(&self, request: CreatePlaceRequest) -> Result<PlaceResponse, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(bad_request_error("Place name is required"));
        }

        if self.places.name_exists(name).await? {
            return Err(conflict_error("Place", "name", name));
        }

        let place = self.places.create(name).await?;
        info!("🏢 Lugar creado: {} ({})", place.name, place.id);

        Ok(place.into())
    }

    pub async fn list_places(&self) -> Result<Vec<PlaceResponse>, AppError> {
        let places = self.places.list_all().await?;
        Ok(places.into_iter().map(PlaceResponse::from).collect())
    }

    pub async fn create_location(
        &self,
        request: CreateLocationRequest,
    ) -> Result<CreateLocationResponse, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(bad_request_error("Location name is required"));
        }
        let floor = request.floor.trim();
        if floor.is_empty() {
            return Err(bad_request_error("Location floor is required"));
        }

        // Una ubicación sin lugar válido no puede existir
        if self.places.find_by_id(request.place_id).await?.is_none() {
            return Err(invalid_reference_error("Place", request.place_id));
        }

        let location = self
            .locations
            .create(request.place_id, name, floor)
            .await?;
        info!(
            "📍 Ubicación creada: {} en planta {} del lugar {}",
            location.name, location.floor, location.place_id
        );

        Ok(CreateLocationResponse {
            id: location.id,
            message: "Location saved".to_string(),
        })
    }

    pub async fn list_locations_by_place(&self, place_id: i64) -> Result<Vec<LocationResponse>, AppError> {
        let locations = self.locations.list_by_place(place_id).await?;
        Ok(locations.into_iter().map(LocationResponse::from).collect())
    }

    pub async fn list_locations(&self) -> Result<Vec<LocationDetailResponse>, AppError> {
        let locations = self.locations.list_all().await?;
        Ok(locations.into_iter().map(LocationDetailResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;

    async fn controller() -> PlaceController {
        PlaceController::new(connect_in_memory().await.unwrap())
    }

    fn place(name: &str) -> CreatePlaceRequest {
        CreatePlaceRequest {
            name: name.to_string(),
        }
    }

    fn location(name: &str, place_id: i64) -> CreateLocationRequest {
        CreateLocationRequest {
            name: name.to_string(),
            floor: "Ground".to_string(),
            place_id,
        }
    }

    #[tokio::test]
    async fn test_duplicate_place_name_is_conflict() {
        let controller = controller().await;
        let first = controller.create_place(place("Airport")).await.unwrap();

        let second = controller.create_place(place("Airport")).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        let places = controller.list_places().await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, first.id);
        assert_eq!(places[0].name, "Airport");
    }

    #[tokio::test]
    async fn test_blank_place_name_is_rejected() {
        let controller = controller().await;
        let result = controller.create_place(place("   ")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_location_requires_existing_place() {
        let controller = controller().await;
        let result = controller.create_location(location("Gate 4", 42)).await;
        assert!(matches!(result, Err(AppError::InvalidReference(_))));
        assert!(controller.list_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_locations_are_listed_per_place() {
        let controller = controller().await;
        let airport = controller.create_place(place("Airport")).await.unwrap();
        let mall = controller.create_place(place("Mall")).await.unwrap();

        controller.create_location(location("Gate 4", airport.id)).await.unwrap();
        controller.create_location(location("Gate 4", airport.id)).await.unwrap();
        controller.create_location(location("Cinema", mall.id)).await.unwrap();

        let airport_locations = controller.list_locations_by_place(airport.id).await.unwrap();
        assert_eq!(airport_locations.len(), 2);
        assert!(airport_locations.iter().all(|l| l.name == "Gate 4"));

        let all = controller.list_locations().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].place_id, mall.id);
    }

    #[tokio::test]
    async fn test_blank_floor_is_rejected() {
        let controller = controller().await;
        let airport = controller.create_place(place("Airport")).await.unwrap();

        let mut request = location("Gate 4", airport.id);
        request.floor = "   ".to_string();
        let result = controller.create_location(request).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(controller.list_locations().await.unwrap().is_empty());
    }
}
