use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{CreateAcceptDto, ListQueryDto};
use crate::errors::ApiError;
use crate::models::Accept;
use crate::repo;

/// Handler for recording an accept for a place
///
/// This function handles POST requests to `/places/{place_id}/accepts`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `place_id` - The ID of the place being confirmed
/// * `payload` - The request payload naming the confirming user
///
/// ### Returns
///
/// The newly created accept as JSON
#[instrument(skip(pool), fields(place_id = %place_id, created_by = %payload.created_by))]
pub async fn create_accept_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(place_id): Path<String>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreateAcceptDto>,
) -> Result<Json<Accept>, ApiError> {
    info!("Recording accept for place");

    // First check if the place exists
    let place = repo::get_place(&pool, &place_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to create the accept
    let accept = repo::create_accept(&pool, &place.get_id(), payload.created_by)
        .await
        .map_err(ApiError::Database)?;

    info!("Successfully created accept with id: {}", accept.get_id());

    // Return the created accept as JSON
    Ok(Json(accept))
}

/// Handler for retrieving a specific accept
///
/// This function handles GET requests to `/accepts/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the accept to retrieve, extracted from the URL path
///
/// ### Returns
///
/// The requested accept as JSON, or null if not found
#[instrument(skip(pool), fields(accept_id = %id))]
pub async fn get_accept_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the accept ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<Option<Accept>>, ApiError> {
    debug!("Getting accept");

    // Call the repository function to get the accept
    let accept = repo::get_accept(&pool, &id).map_err(ApiError::Database)?;

    // Return the accept (or None) as JSON
    Ok(Json(accept))
}

/// Handler for listing the accepts of a place
///
/// This function handles GET requests to `/places/{place_id}/accepts`.
/// Soft-deleted accepts are skipped unless `include_deleted=true` is passed.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `place_id` - The ID of the place whose accepts are listed
/// * `query` - Query parameters controlling soft-delete visibility
///
/// ### Returns
///
/// A list of accepts as JSON, newest first
#[instrument(skip(pool, query), fields(place_id = %place_id))]
pub async fn list_accepts_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(place_id): Path<String>,
    // Extract and parse query parameters
    Query(query): Query<ListQueryDto>,
) -> Result<Json<Vec<Accept>>, ApiError> {
    debug!("Listing accepts with query: {:?}", query);

    // First check if the place exists
    repo::get_place(&pool, &place_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function matching the requested visibility
    let accepts = if query.include_deleted {
        repo::list_accepts_for_place(&pool, &place_id).map_err(ApiError::Database)?
    } else {
        repo::list_active_accepts_for_place(&pool, &place_id).map_err(ApiError::Database)?
    };

    info!("Retrieved {} accepts", accepts.len());

    // Return the list of accepts as JSON
    Ok(Json(accepts))
}

/// Handler for soft-deleting an accept
///
/// This function handles DELETE requests to `/accepts/{id}`. The row is
/// kept and only flagged, so the place's accept count is unaffected.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the accept to flag, extracted from the URL path
///
/// ### Returns
///
/// The flagged accept as JSON
#[instrument(skip(pool), fields(accept_id = %id))]
pub async fn soft_delete_accept_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the accept ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<Accept>, ApiError> {
    info!("Soft-deleting accept");

    // First check if the accept exists
    repo::get_accept(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to flag the accept
    repo::soft_delete_accept(&pool, &id)
        .await
        .map_err(ApiError::Database)?;

    // Re-fetch so the response carries the flagged row
    let accept = repo::get_accept(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    info!("Successfully soft-deleted accept with id: {}", accept.get_id());

    // Return the flagged accept as JSON
    Ok(Json(accept))
}
