use crate::db::{DbPool, ExecuteWithRetry};
use crate::dto::PlaceSummaryDto;
use crate::models::{AcceptType, Place, validate_coordinates};
use crate::schema::places;
use anyhow::{Result, anyhow};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Creates a new place in the database
///
/// The coordinates are validated against the covered region before the
/// insert; the database CHECK constraints back the same bounds up.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `name` - Display name of the place
/// * `latitude` - Latitude of the place
/// * `longitude` - Longitude of the place
/// * `address` - Postal address of the place
/// * `created_by` - Id of the creating user
///
/// ### Returns
///
/// A Result containing the newly created Place if successful
///
/// ### Errors
///
/// Returns an error if:
/// - The coordinates lie outside the covered region
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool), fields(name = %name, latitude = %latitude, longitude = %longitude))]
pub async fn create_place(
    pool: &DbPool,
    name: String,
    latitude: f64,
    longitude: f64,
    address: String,
    created_by: i32,
) -> Result<Place> {
    debug!("Creating new place");

    // Reject out-of-region coordinates before touching the database
    validate_coordinates(latitude, longitude)?;

    let mut conn = pool.get()?;

    let new_place = Place::new(name, latitude, longitude, address, created_by);

    debug!("Inserting place into database with id: {}", new_place.get_id());

    diesel::insert_into(places::table)
        .values(new_place.clone())
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully created place with id: {}", new_place.get_id());

    Ok(new_place)
}

/// Retrieves a place from the database by its ID
///
/// Soft-deleted places are returned like any other row.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Place if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the place not existing
#[instrument(skip(pool), fields(place_id = %place_id))]
pub fn get_place(pool: &DbPool, place_id: &str) -> Result<Option<Place>> {
    debug!("Retrieving place by id");

    let conn = &mut pool.get()?;

    let result = places::table
        .find(place_id)
        .first::<Place>(conn)
        .optional()?;

    if let Some(ref place) = result {
        debug!("Place found with id: {}", place.get_id());
    } else {
        debug!("Place not found");
    }

    Ok(result)
}

/// Lists all places in the database, soft-deleted ones included
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing a vector of all Places
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_places(pool: &DbPool) -> Result<Vec<Place>> {
    let conn = &mut pool.get()?;

    let results = places::table.load::<Place>(conn)?;

    Ok(results)
}

/// Lists the places that are not soft-deleted
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing a vector of Places with deleted_flg unset
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_active_places(pool: &DbPool) -> Result<Vec<Place>> {
    let conn = &mut pool.get()?;

    let results = places::table
        .filter(places::deleted_flg.eq(false))
        .load::<Place>(conn)?;

    Ok(results)
}

/// Soft-deletes a place
///
/// Flips deleted_flg and persists only that column; every other field keeps
/// its value. Calling this on an already soft-deleted place succeeds and
/// changes nothing. The place's accepts, ratings and images are untouched.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to soft-delete
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
/// - The place does not exist
#[instrument(skip(pool), fields(place_id = %place_id))]
pub async fn soft_delete_place(pool: &DbPool, place_id: &str) -> Result<()> {
    debug!("Soft-deleting place");

    let _place = get_place(pool, place_id)?.ok_or(anyhow!("Place not found"))?;

    let mut conn = pool.get()?;

    diesel::update(places::table.find(place_id.to_string()))
        .set(places::deleted_flg.eq(true))
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully soft-deleted place with id: {}", place_id);
    Ok(())
}

/// Physically deletes a place from the database
///
/// The place's accepts, ratings and images are removed with it through the
/// ON DELETE CASCADE foreign keys. This is the cleanup path; regular
/// deletion goes through `soft_delete_place`.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to delete
///
/// ### Returns
///
/// A Result indicating success (Ok(())) or an error
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database delete operation fails
/// - The place does not exist
#[instrument(skip(pool), fields(place_id = %place_id))]
pub async fn delete_place(pool: &DbPool, place_id: &str) -> Result<()> {
    debug!("Deleting place by id");

    let _place = get_place(pool, place_id)?.ok_or(anyhow!("Place not found"))?;

    let mut conn = pool.get()?;

    diesel::delete(places::table.find(place_id.to_string()))
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully deleted place with id: {}", place_id);
    Ok(())
}

/// Assembles the derived metrics for a place
///
/// Combines the mean of the non-deleted ratings, the total accept count
/// (soft-deleted accepts included) and the verification tier derived from
/// that count. Nothing is stored; every call recomputes from the children.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to summarize
///
/// ### Returns
///
/// A Result containing Some summary, or None if the place does not exist
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - Any of the underlying queries fail
#[instrument(skip(pool), fields(place_id = %place_id))]
pub fn get_place_summary(pool: &DbPool, place_id: &str) -> Result<Option<PlaceSummaryDto>> {
    debug!("Building summary for place");

    let place = match get_place(pool, place_id)? {
        Some(place) => place,
        None => return Ok(None),
    };

    let rating = super::average_rating_for_place(pool, place_id)?;
    let accepts_cnt = super::count_accepts_for_place(pool, place_id)?;
    let accept_type = AcceptType::from_count(accepts_cnt);

    debug!(
        "Summary for place {}: rating {}, {} accepts, tier {}",
        place_id, rating, accepts_cnt, accept_type
    );

    Ok(Some(PlaceSummaryDto {
        place_id: place.get_id(),
        rating,
        accepts_cnt,
        accept_type,
    }))
}
