use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{CreateRatingDto, ListQueryDto, UpdateRatingDto};
use crate::errors::ApiError;
use crate::models::{Rating, validate_rating_value};
use crate::repo;

/// Handler for rating a place
///
/// This function handles POST requests to `/places/{place_id}/ratings`.
/// The value is validated against the 0-5 scale before anything is written.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `place_id` - The ID of the place being rated
/// * `payload` - The request payload with the rater and the value
///
/// ### Returns
///
/// The newly created rating as JSON
#[instrument(skip(pool), fields(place_id = %place_id, rating = %payload.rating))]
pub async fn create_rating_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(place_id): Path<String>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreateRatingDto>,
) -> Result<Json<Rating>, ApiError> {
    info!("Creating new rating");

    // Validate the value before touching the database
    validate_rating_value(payload.rating)?;

    // Then check if the place exists
    let place = repo::get_place(&pool, &place_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to create the rating
    let rating = repo::create_rating(&pool, &place.get_id(), payload.created_by, payload.rating)
        .await
        .map_err(ApiError::Database)?;

    info!("Successfully created rating with id: {}", rating.get_id());

    // Return the created rating as JSON
    Ok(Json(rating))
}

/// Handler for retrieving a specific rating
///
/// This function handles GET requests to `/ratings/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the rating to retrieve, extracted from the URL path
///
/// ### Returns
///
/// The requested rating as JSON, or null if not found
#[instrument(skip(pool), fields(rating_id = %id))]
pub async fn get_rating_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the rating ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<Option<Rating>>, ApiError> {
    debug!("Getting rating");

    // Call the repository function to get the rating
    let rating = repo::get_rating(&pool, &id).map_err(ApiError::Database)?;

    // Return the rating (or None) as JSON
    Ok(Json(rating))
}

/// Handler for listing the ratings of a place
///
/// This function handles GET requests to `/places/{place_id}/ratings`.
/// Soft-deleted ratings are skipped unless `include_deleted=true` is passed.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `place_id` - The ID of the place whose ratings are listed
/// * `query` - Query parameters controlling soft-delete visibility
///
/// ### Returns
///
/// A list of ratings as JSON, newest first
#[instrument(skip(pool, query), fields(place_id = %place_id))]
pub async fn list_ratings_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(place_id): Path<String>,
    // Extract and parse query parameters
    Query(query): Query<ListQueryDto>,
) -> Result<Json<Vec<Rating>>, ApiError> {
    debug!("Listing ratings with query: {:?}", query);

    // First check if the place exists
    repo::get_place(&pool, &place_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function matching the requested visibility
    let ratings = if query.include_deleted {
        repo::list_ratings_for_place(&pool, &place_id).map_err(ApiError::Database)?
    } else {
        repo::list_active_ratings_for_place(&pool, &place_id).map_err(ApiError::Database)?
    };

    info!("Retrieved {} ratings", ratings.len());

    // Return the list of ratings as JSON
    Ok(Json(ratings))
}

/// Handler for changing the value of a rating
///
/// This function handles PUT requests to `/ratings/{id}`. Only the value
/// and `updated_dt` change; the creation timestamp is preserved.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the rating to update, extracted from the URL path
/// * `payload` - The request payload with the new value
///
/// ### Returns
///
/// The updated rating as JSON
#[instrument(skip(pool), fields(rating_id = %id, rating = %payload.rating))]
pub async fn update_rating_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the rating ID from the URL path
    Path(id): Path<String>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<UpdateRatingDto>,
) -> Result<Json<Rating>, ApiError> {
    info!("Updating rating");

    // Validate the value before touching the database
    validate_rating_value(payload.rating)?;

    // Then check if the rating exists
    repo::get_rating(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to update the rating
    let rating = repo::update_rating(&pool, &id, payload.rating)
        .await
        .map_err(ApiError::Database)?;

    info!("Successfully updated rating with id: {}", rating.get_id());

    // Return the updated rating as JSON
    Ok(Json(rating))
}

/// Handler for soft-deleting a rating
///
/// This function handles DELETE requests to `/ratings/{id}`. The row is
/// kept and only flagged, which removes it from the place's average.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the rating to flag, extracted from the URL path
///
/// ### Returns
///
/// The flagged rating as JSON
#[instrument(skip(pool), fields(rating_id = %id))]
pub async fn soft_delete_rating_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the rating ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<Rating>, ApiError> {
    info!("Soft-deleting rating");

    // First check if the rating exists
    repo::get_rating(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to flag the rating
    repo::soft_delete_rating(&pool, &id)
        .await
        .map_err(ApiError::Database)?;

    // Re-fetch so the response carries the flagged row
    let rating = repo::get_rating(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    info!("Successfully soft-deleted rating with id: {}", rating.get_id());

    // Return the flagged rating as JSON
    Ok(Json(rating))
}
