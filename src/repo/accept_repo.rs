use crate::db::{DbPool, ExecuteWithRetry};
use crate::models::Accept;
use crate::schema::accepts;
use anyhow::{Result, anyhow};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Records an accept for a place
///
/// The place has to exist physically; a soft-deleted place still takes
/// accepts, since the flag is not a tombstone at the foreign-key level.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place being accepted
/// * `created_by` - Id of the accepting user
///
/// ### Returns
///
/// A Result containing the newly created Accept if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
/// - The place does not exist
#[instrument(skip(pool), fields(place_id = %place_id, created_by = %created_by))]
pub async fn create_accept(pool: &DbPool, place_id: &str, created_by: i32) -> Result<Accept> {
    debug!("Recording accept for place");

    let _place = super::get_place(pool, place_id)?.ok_or(anyhow!("Place not found"))?;

    let mut conn = pool.get()?;

    let new_accept = Accept::new(place_id, created_by);

    diesel::insert_into(accepts::table)
        .values(new_accept.clone())
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully recorded accept with id: {}", new_accept.get_id());

    Ok(new_accept)
}

/// Retrieves an accept from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `accept_id` - The ID of the accept to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the Accept if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the accept not existing
#[instrument(skip(pool), fields(accept_id = %accept_id))]
pub fn get_accept(pool: &DbPool, accept_id: &str) -> Result<Option<Accept>> {
    debug!("Retrieving accept by id");

    let conn = &mut pool.get()?;

    let result = accepts::table
        .find(accept_id)
        .first::<Accept>(conn)
        .optional()?;

    Ok(result)
}

/// Gets all accepts for a place, newest first, soft-deleted ones included
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to get accepts for
///
/// ### Returns
///
/// A Result containing a vector of Accepts for the place
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_accepts_for_place(pool: &DbPool, place_id: &str) -> Result<Vec<Accept>> {
    let conn = &mut pool.get()?;

    let accepts = accepts::table
        .filter(accepts::place_id.eq(place_id))
        .order_by(accepts::created_dt.desc())
        .load::<Accept>(conn)?;

    Ok(accepts)
}

/// Gets the accepts for a place that are not soft-deleted, newest first
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to get accepts for
///
/// ### Returns
///
/// A Result containing a vector of Accepts with deleted_flg unset
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
pub fn list_active_accepts_for_place(pool: &DbPool, place_id: &str) -> Result<Vec<Accept>> {
    let conn = &mut pool.get()?;

    let accepts = accepts::table
        .filter(accepts::place_id.eq(place_id))
        .filter(accepts::deleted_flg.eq(false))
        .order_by(accepts::created_dt.desc())
        .load::<Accept>(conn)?;

    Ok(accepts)
}

/// Counts all accepts for a place, soft-deleted ones INCLUDED
///
/// The verification tier is derived from this number. Unlike the rating
/// average, which skips soft-deleted rows, the count runs over every accept
/// the place ever received. The asymmetry is inherited behavior the tier
/// thresholds were calibrated against; do not add a deleted_flg filter here.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `place_id` - The ID of the place to count accepts for
///
/// ### Returns
///
/// A Result containing the number of accepts
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool), fields(place_id = %place_id))]
pub fn count_accepts_for_place(pool: &DbPool, place_id: &str) -> Result<i64> {
    let conn = &mut pool.get()?;

    let count = accepts::table
        .filter(accepts::place_id.eq(place_id))
        .count()
        .get_result::<i64>(conn)?;

    debug!("Place {} has {} accepts", place_id, count);

    Ok(count)
}

/// Soft-deletes an accept
///
/// Flips deleted_flg and persists only that column. Idempotent for rows
/// that are already soft-deleted. The accept keeps counting toward the
/// place's verification tier.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `accept_id` - The ID of the accept to soft-delete
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
/// - The accept does not exist
#[instrument(skip(pool), fields(accept_id = %accept_id))]
pub async fn soft_delete_accept(pool: &DbPool, accept_id: &str) -> Result<()> {
    debug!("Soft-deleting accept");

    let _accept = get_accept(pool, accept_id)?.ok_or(anyhow!("Accept not found"))?;

    let mut conn = pool.get()?;

    diesel::update(accepts::table.find(accept_id.to_string()))
        .set(accepts::deleted_flg.eq(true))
        .execute_with_retry(&mut conn)
        .await?;

    info!("Successfully soft-deleted accept with id: {}", accept_id);
    Ok(())
}
