use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{CreatePlaceImageDto, ListQueryDto};
use crate::errors::ApiError;
use crate::models::PlaceImage;
use crate::repo;

/// Handler for attaching an image to a place
///
/// This function handles POST requests to `/places/{place_id}/images`.
/// Only the external picture ID is stored, not the image bytes.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `place_id` - The ID of the place the image belongs to
/// * `payload` - The request payload with the uploader and picture ID
///
/// ### Returns
///
/// The newly created image record as JSON
#[instrument(skip(pool), fields(place_id = %place_id, pic_id = %payload.pic_id))]
pub async fn create_place_image_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(place_id): Path<String>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreatePlaceImageDto>,
) -> Result<Json<PlaceImage>, ApiError> {
    info!("Attaching image to place");

    // First check if the place exists
    let place = repo::get_place(&pool, &place_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to create the image record
    let image = repo::create_place_image(&pool, &place.get_id(), payload.created_by, payload.pic_id)
        .await
        .map_err(ApiError::Database)?;

    info!("Successfully created image with id: {}", image.get_id());

    // Return the created image record as JSON
    Ok(Json(image))
}

/// Handler for retrieving a specific image record
///
/// This function handles GET requests to `/images/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the image record to retrieve, extracted from the URL path
///
/// ### Returns
///
/// The requested image record as JSON, or null if not found
#[instrument(skip(pool), fields(image_id = %id))]
pub async fn get_place_image_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the image ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<Option<PlaceImage>>, ApiError> {
    debug!("Getting image");

    // Call the repository function to get the image record
    let image = repo::get_place_image(&pool, &id).map_err(ApiError::Database)?;

    // Return the image record (or None) as JSON
    Ok(Json(image))
}

/// Handler for listing the images of a place
///
/// This function handles GET requests to `/places/{place_id}/images`.
/// Soft-deleted images are skipped unless `include_deleted=true` is passed.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `place_id` - The ID of the place whose images are listed
/// * `query` - Query parameters controlling soft-delete visibility
///
/// ### Returns
///
/// A list of image records as JSON, newest first
#[instrument(skip(pool, query), fields(place_id = %place_id))]
pub async fn list_place_images_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the place ID from the URL path
    Path(place_id): Path<String>,
    // Extract and parse query parameters
    Query(query): Query<ListQueryDto>,
) -> Result<Json<Vec<PlaceImage>>, ApiError> {
    debug!("Listing images with query: {:?}", query);

    // First check if the place exists
    repo::get_place(&pool, &place_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function matching the requested visibility
    let images = if query.include_deleted {
        repo::list_images_for_place(&pool, &place_id).map_err(ApiError::Database)?
    } else {
        repo::list_active_images_for_place(&pool, &place_id).map_err(ApiError::Database)?
    };

    info!("Retrieved {} images", images.len());

    // Return the list of image records as JSON
    Ok(Json(images))
}

/// Handler for soft-deleting an image record
///
/// This function handles DELETE requests to `/images/{id}`. The row is
/// kept and only flagged.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `id` - The ID of the image record to flag, extracted from the URL path
///
/// ### Returns
///
/// The flagged image record as JSON
#[instrument(skip(pool), fields(image_id = %id))]
pub async fn soft_delete_place_image_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the image ID from the URL path
    Path(id): Path<String>,
) -> Result<Json<PlaceImage>, ApiError> {
    info!("Soft-deleting image");

    // First check if the image record exists
    repo::get_place_image(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    // Call the repository function to flag the image record
    repo::soft_delete_place_image(&pool, &id)
        .await
        .map_err(ApiError::Database)?;

    // Re-fetch so the response carries the flagged row
    let image = repo::get_place_image(&pool, &id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    info!("Successfully soft-deleted image with id: {}", image.get_id());

    // Return the flagged image record as JSON
    Ok(Json(image))
}
