use crate::db::{DbPool, ExecuteWithRetry};
use crate::models::PlaceImage;
use crate::schema::place_images;
use anyhow::{Result, anyhow};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Attaches an image record to a place
///
/// Only the external pic_id is stored, never image bytes. The place has to
/// exist physically.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place the image belongs to
/// * `created_by` - Id of the attaching user
/// * `pic_id` - External picture identifier
///
/// ### Returns
///
/// A Result containing the newly created PlaceImage if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
/// - The place does not exist
#[instrument(skip(pool), fields(place_id = %place_id, pic_id = %pic_id))]
pub async fn create_place_image(
    pool: &DbPool,
    place_id: &str,
    created_by: i32,
    pic_id: i32,
) -> Result<PlaceImage> {
    debug!("Attaching image to place");

    let _place = super::get_place(pool, place_id)?.ok_or(anyhow!("Place not found"))?;

    let mut conn = pool.get()?;

    let new_image = PlaceImage::new(place_id, created_by, pic_id);

    diesel::insert_into(place_images::table)
        .values(new_image.clone())
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully attached image with id: {}", new_image.get_id());

    Ok(new_image)
}

/// Retrieves an image record from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `image_id` - The ID of the image record to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the PlaceImage if found, or None if
/// not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the image not existing
#[instrument(skip(pool), fields(image_id = %image_id))]
pub fn get_place_image(pool: &DbPool, image_id: &str) -> Result<Option<PlaceImage>> {
    debug!("Retrieving image by id");

    let conn = &mut pool.get()?;

    let result = place_images::table
        .find(image_id)
        .first::<PlaceImage>(conn)
        .optional()?;

    Ok(result)
}

/// Gets all image records for a place, newest first, soft-deleted ones
/// included
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to get images for
///
/// ### Returns
///
/// A Result containing a vector of PlaceImages for the place
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_images_for_place(pool: &DbPool, place_id: &str) -> Result<Vec<PlaceImage>> {
    let conn = &mut pool.get()?;

    let images = place_images::table
        .filter(place_images::place_id.eq(place_id))
        .order_by(place_images::created_dt.desc())
        .load::<PlaceImage>(conn)?;

    Ok(images)
}

/// Gets the image records for a place that are not soft-deleted, newest first
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to get images for
///
/// ### Returns
///
/// A Result containing a vector of PlaceImages with deleted_flg unset
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_active_images_for_place(pool: &DbPool, place_id: &str) -> Result<Vec<PlaceImage>> {
    let conn = &mut pool.get()?;

    let images = place_images::table
        .filter(place_images::place_id.eq(place_id))
        .filter(place_images::deleted_flg.eq(false))
        .order_by(place_images::created_dt.desc())
        .load::<PlaceImage>(conn)?;

    Ok(images)
}

/// Soft-deletes an image record
///
/// Flips deleted_flg and persists only that column. Idempotent for rows
/// that are already soft-deleted.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `image_id` - The ID of the image record to soft-delete
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database update operation fails
/// - The image does not exist
#[instrument(skip(pool), fields(image_id = %image_id))]
pub async fn soft_delete_place_image(pool: &DbPool, image_id: &str) -> Result<()> {
    debug!("Soft-deleting image");

    let _image = get_place_image(pool, image_id)?.ok_or(anyhow!("Image not found"))?;

    let mut conn = pool.get()?;

    diesel::update(place_images::table.find(image_id.to_string()))
        .set(place_images::deleted_flg.eq(true))
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully soft-deleted image with id: {}", image_id);
    Ok(())
}
