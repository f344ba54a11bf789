use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{CreatePlaceDto, ListQueryDto, PlaceSummaryDto};
use crate::errors::ApiError;
use crate::models::{Place, validate_coordinates};
use crate::repo;

/// Handler for creating a new place
///
/// This function handles POST requests to `/places`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The request payload containing the place data
///
/// ### Returns
///
/// The newly created place as JSON, or a 400 when the coordinates fall
/// outside the covered region
#[instrument(skip(pool), fields(name = %payload.name, latitude = %payload.latitude, longitude = %payload.longitude))]
pub async fn create_place_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreatePlaceDto>,
) -> Result<Json<Place>, ApiError> {
    info!("Creating new place");

    // Reject out-of-box coordinates before touching the database
    validate_coordinates(payload.latitude, payload.longitude)?;

    // Call the repository function to create the place
    let place = repo::create_place(
        &pool,
        payload.name,
        payload.latitude,
        payload.longitude,
        payload.address,
        payload.created_by,
    )
    .await
    .map_err(ApiError::Database)?;

    info!("Successfully created place with id: {}", place.get_id());

    // Return the created place as JSON
    Ok(Json(place))
}

/// Handler for retrieving a specific place
///
/// This function handles GET requests to `/places/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the place to retrieve, extracted from the URL path
///
/// ### Returns
///
/// The requested place as JSON, or null if not found
#[instrument(skip(pool), fields(place_id = %id))]
pub async fn get_place_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<Option<Place>>, ApiError> {
    debug!("Getting place");

    // Call the repository function to get the place
    let place = repo::get_place(&pool, &id).map_err(ApiError::Database)?;

    if let Some(ref place) = place {
        debug!("Place found with id: {}", place.get_id());
    } else {
        debug!("Place not found");
    }

    // Return the place (or None) as JSON
    Ok(Json(place))
}

/// Handler for listing places
///
/// This function handles GET requests to `/places`. Soft-deleted places
/// are skipped unless `include_deleted=true` is passed.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `query` - Query parameters controlling soft-delete visibility
///
/// ### Returns
///
/// A list of places as JSON
#[instrument(skip(pool, query))]
pub async fn list_places_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and parse query parameters
    Query(query): Query<ListQueryDto>,
) -> Result<Json<Vec<Place>>, ApiError> {
    debug!("Listing places with query: {:?}", query);

    // Call the repository function matching the requested visibility
    let places = if query.include_deleted {
        repo::list_places(&pool).map_err(ApiError::Database)?
    } else {
        repo::list_active_places(&pool).map_err(ApiError::Database)?
    };

    info!("Retrieved {} places", places.len());

    // Return the list of places as JSON
    Ok(Json(places))
}

/// Handler for soft-deleting a place
///
/// This function handles DELETE requests to `/places/{id}`. The row is
/// kept and only flagged; repeating the request is harmless.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the place to flag, extracted from the URL path
///
/// ### Returns
///
/// The flagged place as JSON
#[instrument(skip(pool), fields(place_id = %id))]
pub async fn soft_delete_place_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<Place>, ApiError> {
    info!("Soft-deleting place");

    // First check if the place exists
    repo::get_place(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to flag the place
    repo::soft_delete_place(&pool, &id)
        .await
        .map_err(ApiError::Database)?;

    // Re-fetch so the response carries the flagged row
    let place = repo::get_place(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    info!("Successfully soft-deleted place with id: {}", place.get_id());

    // Return the flagged place as JSON
    Ok(Json(place))
}

/// Handler for retrieving the derived summary of a place
///
/// This function handles GET requests to `/places/{id}/summary`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the place to summarize, extracted from the URL path
///
/// ### Returns
///
/// The place summary as JSON, or a 404 if the place does not exist
#[instrument(skip(pool), fields(place_id = %id))]
pub async fn get_place_summary_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<PlaceSummaryDto>, ApiError> {
    debug!("Getting place summary");

    // Call the repository function to build the summary
    let summary = repo::get_place_summary(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    debug!(
        "Summary for place {}: rating={}, accepts_cnt={}",
        summary.place_id, summary.rating, summary.accepts_cnt
    );

    // Return the summary as JSON
    Ok(Json(summary))
}
