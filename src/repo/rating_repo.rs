use crate::db::{DbPool, ExecuteWithRetry};
use crate::models::{Rating, validate_rating_value};
use crate::schema::ratings;
use anyhow::{Result, anyhow};
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Double, Nullable};
use tracing::{debug, info, instrument};

/// Creates a new rating for a place
///
/// The value is validated before the insert and the place has to exist
/// physically; a soft-deleted place can still be rated.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place being rated
/// * `created_by` - Id of the rating user
/// * `rating_val` - The score given (0-5)
///
/// ### Returns
///
/// A Result containing the newly created Rating if successful
///
/// ### Errors
///
/// Returns an error if:
/// - The value is outside 0-5
/// - Unable to get a connection from the pool
/// - The database insert operation fails
/// - The place does not exist
#[instrument(skip(pool), fields(place_id = %place_id, rating = %rating_val))]
pub async fn create_rating(
    pool: &DbPool,
    place_id: &str,
    created_by: i32,
    rating_val: i32,
) -> Result<Rating> {
    debug!("Creating new rating");

    // Validate the value; this also keeps Rating::new from panicking
    validate_rating_value(rating_val)?;

    let _place = super::get_place(pool, place_id)?.ok_or(anyhow!("Place not found"))?;

    let mut conn = pool.get()?;

    let new_rating = Rating::new(place_id, created_by, rating_val);

    diesel::insert_into(ratings::table)
        .values(new_rating.clone())
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully created rating with id: {}", new_rating.get_id());

    Ok(new_rating)
}

/// Retrieves a rating from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `rating_id` - The ID of the rating to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Rating if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the rating not existing
#[instrument(skip(pool), fields(rating_id = %rating_id))]
pub fn get_rating(pool: &DbPool, rating_id: &str) -> Result<Option<Rating>> {
    debug!("Retrieving rating by id");

    let conn = &mut pool.get()?;

    let result = ratings::table
        .find(rating_id)
        .first::<Rating>(conn)
        .optional()?;

    Ok(result)
}

/// Gets all ratings for a place, newest first, soft-deleted ones included
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to get ratings for
///
/// ### Returns
///
/// A Result containing a vector of Ratings for the place
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_ratings_for_place(pool: &DbPool, place_id: &str) -> Result<Vec<Rating>> {
    let conn = &mut pool.get()?;

    let ratings = ratings::table
        .filter(ratings::place_id.eq(place_id))
        .order_by(ratings::created_dt.desc())
        .load::<Rating>(conn)?;

    Ok(ratings)
}

/// Gets the ratings for a place that are not soft-deleted, newest first
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to get ratings for
///
/// ### Returns
///
/// A Result containing a vector of Ratings with deleted_flg unset
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_active_ratings_for_place(pool: &DbPool, place_id: &str) -> Result<Vec<Rating>> {
    let conn = &mut pool.get()?;

    let ratings = ratings::table
        .filter(ratings::place_id.eq(place_id))
        .filter(ratings::deleted_flg.eq(false))
        .order_by(ratings::created_dt.desc())
        .load::<Rating>(conn)?;

    Ok(ratings)
}

/// Computes the mean score over a place's non-deleted ratings
///
/// Soft-deleted ratings are excluded, in contrast to the accept count.
/// Returns 0.0 when the place has no active ratings; SQL's avg comes back
/// NULL in that case and the NULL is mapped here.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to average ratings for
///
/// ### Returns
///
/// A Result containing the mean score, or 0.0 without ratings
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool), fields(place_id = %place_id))]
pub fn average_rating_for_place(pool: &DbPool, place_id: &str) -> Result<f64> {
    let conn = &mut pool.get()?;

    // diesel's avg() maps integer columns to Numeric, which SQLite has no
    // deserialization for; select the aggregate as a nullable double instead
    let average: Option<f64> = ratings::table
        .filter(ratings::place_id.eq(place_id))
        .filter(ratings::deleted_flg.eq(false))
        .select(sql::<Nullable<Double>>("avg(rating)"))
        .first(conn)?;

    let average = average.unwrap_or(0.0);

    debug!("Average rating for place {}: {}", place_id, average);

    Ok(average)
}

/// Updates a rating's score
///
/// Sets the new value and advances updated_dt; created_dt and deleted_flg
/// keep their values.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `rating_id` - The ID of the rating to update
/// * `rating_val` - The new score - must be between 0 and 5
///
/// ### Returns
///
/// A Result containing the updated Rating if successful
///
/// ### Errors
///
/// Returns an error if:
/// - The value is outside 0-5
/// - Unable to get a connection from the pool
/// - The database update operation fails
/// - The rating does not exist
pub async fn update_rating(pool: &DbPool, rating_id: &str, rating_val: i32) -> Result<Rating> {
    // Check the value before touching the database
    validate_rating_value(rating_val)?;

    // Check if the rating exists
    let rating = get_rating(pool, rating_id)?;
    if rating.is_none() {
        return Err(anyhow!("Rating not found"));
    }

    let mut conn = pool.get()?;
    diesel::update(ratings::table.find(rating_id.to_string()))
        .set((
            ratings::rating.eq(rating_val),
            ratings::updated_dt.eq(Utc::now().naive_utc()),
        ))
        .execute_with_retry(&mut conn)
        .await?;

    drop(conn);

    let rating = get_rating(pool, rating_id)?;

    Ok(rating.unwrap_or_else(|| {
        panic!("We already checked that the rating exists, so this should never happen")
    }))
}

/// Soft-deletes a rating
///
/// Flips deleted_flg and persists only that column; in particular
/// updated_dt stays where the last value change left it. Idempotent for
/// rows that are already soft-deleted. The rating stops counting toward
/// the place's average.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `rating_id` - The ID of the rating to soft-delete
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
/// - The rating does not exist
#[instrument(skip(pool), fields(rating_id = %rating_id))]
pub async fn soft_delete_rating(pool: &DbPool, rating_id: &str) -> Result<()> {
    debug!("Soft-deleting rating");

    let _rating = get_rating(pool, rating_id)?.ok_or(anyhow!("Rating not found"))?;

    let mut conn = pool.get()?;

    diesel::update(ratings::table.find(rating_id.to_string()))
        .set(ratings::deleted_flg.eq(true))
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully soft-deleted rating with id: {}", rating_id);
    Ok(())
}
