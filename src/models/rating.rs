use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Lowest allowed rating value
pub const RATING_MIN: i32 = 0;
/// Highest allowed rating value
pub const RATING_MAX: i32 = 5;

/// Checks that a rating value lies in [RATING_MIN, RATING_MAX]
///
/// This is the non-panicking counterpart of the check in `Rating::new`,
/// meant to run before anything is persisted.
///
/// ### Errors
///
/// Returns `ValidationError::RatingOutOfRange` carrying the offending value.
pub fn validate_rating_value(value: i32) -> Result<(), ValidationError> {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(ValidationError::RatingOutOfRange(value));
    }
    Ok(())
}

/// Represents a user's rating of a place
///
/// Unlike the other child entities a rating is mutable: its value can be
/// changed after creation, and `updated_dt` tracks the last change.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::ratings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Rating {
    /// Unique identifier for the rating (UUID v4 as string)
    id: String,

    /// The ID of the place this rating belongs to
    place_id: String,

    /// Id of the user who rated the place, non-negative
    created_by: i32,

    /// The score given, in [RATING_MIN, RATING_MAX]
    rating: i32,

    /// When this rating was created
    created_dt: NaiveDateTime,

    /// When this rating was last changed; equals created_dt until then
    updated_dt: NaiveDateTime,

    /// Soft-delete marker
    deleted_flg: bool,
}

impl Rating {
    /// Creates a new rating for a place
    ///
    /// ### Arguments
    ///
    /// * `place_id` - The ID of the place being rated
    /// * `created_by` - Id of the rating user
    /// * `rating` - The score given
    ///
    /// ### Returns
    ///
    /// A new `Rating` instance with a generated id; created_dt and
    /// updated_dt are both set to the current time.
    ///
    /// ### Panics
    ///
    /// This function will panic if the rating is not in the range 0-5.
    /// Use `validate_rating_value` first for untrusted input.
    pub fn new(place_id: &str, created_by: i32, rating: i32) -> Self {
        // Validate the rating
        if rating < RATING_MIN || rating > RATING_MAX {
            panic!("Rating must be between 0 and 5, got {}", rating);
        }

        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            place_id: place_id.to_string(),
            created_by,
            rating,
            created_dt: now,
            updated_dt: now,
            deleted_flg: false,
        }
    }

    /// Creates a new rating with all fields specified
    ///
    /// This method is primarily used for testing and database deserialization.
    /// No range check is applied.
    ///
    /// ### Arguments
    ///
    /// * `id` - The unique identifier for the rating
    /// * `place_id` - The ID of the place this rating belongs to
    /// * `created_by` - Id of the rating user
    /// * `rating` - The score given
    /// * `created_dt` - When the rating was created
    /// * `updated_dt` - When the rating was last changed
    /// * `deleted_flg` - Whether the rating is soft-deleted
    ///
    /// ### Returns
    ///
    /// A new `Rating` instance with the specified fields
    pub fn new_with_fields(
        id: String,
        place_id: String,
        created_by: i32,
        rating: i32,
        created_dt: DateTime<Utc>,
        updated_dt: DateTime<Utc>,
        deleted_flg: bool,
    ) -> Self {
        Self {
            id,
            place_id,
            created_by,
            rating,
            created_dt: created_dt.naive_utc(),
            updated_dt: updated_dt.naive_utc(),
            deleted_flg,
        }
    }

    /// Gets the rating's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the place this rating belongs to
    pub fn get_place_id(&self) -> String {
        self.place_id.clone()
    }

    /// Gets the id of the user who rated the place
    pub fn get_created_by(&self) -> i32 {
        self.created_by
    }

    /// Gets the score given
    pub fn get_rating(&self) -> i32 {
        self.rating
    }

    /// Sets the score and advances updated_dt
    ///
    /// ### Arguments
    ///
    /// * `rating` - The new score for the rating
    pub fn set_rating(&mut self, rating: i32) {
        self.rating = rating;
        self.updated_dt = Utc::now().naive_utc();
    }

    /// Gets the rating's creation timestamp as a DateTime<Utc>
    pub fn get_created_dt(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_dt, Utc)
    }

    /// Gets the rating's raw creation timestamp
    pub fn get_created_dt_raw(&self) -> NaiveDateTime {
        self.created_dt
    }

    /// Gets the rating's last-change timestamp as a DateTime<Utc>
    pub fn get_updated_dt(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.updated_dt, Utc)
    }

    /// Gets the rating's raw last-change timestamp
    pub fn get_updated_dt_raw(&self) -> NaiveDateTime {
        self.updated_dt
    }

    /// Gets whether the rating is soft-deleted
    pub fn get_deleted_flg(&self) -> bool {
        self.deleted_flg
    }

    /// Sets the rating's soft-delete marker
    ///
    /// Deliberately leaves updated_dt alone; a soft delete persists only
    /// the flag.
    pub fn set_deleted_flg(&mut self, deleted_flg: bool) {
        self.deleted_flg = deleted_flg;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_new() {
        let place_id = Uuid::new_v4().to_string();

        let rating = Rating::new(&place_id, 3, 4);

        assert_eq!(rating.get_place_id(), place_id);
        assert_eq!(rating.get_created_by(), 3);
        assert_eq!(rating.get_rating(), 4);
        assert!(!rating.get_deleted_flg());
        assert!(Uuid::parse_str(&rating.get_id()).is_ok());

        // created_dt and updated_dt start out equal
        assert_eq!(rating.get_created_dt_raw(), rating.get_updated_dt_raw());

        let now = Utc::now();
        let diff = now.signed_duration_since(rating.get_created_dt());
        assert!(diff.num_seconds() < 1);
    }

    #[test]
    fn test_rating_new_accepts_bounds() {
        // 0 and 5 are both valid scores
        let low = Rating::new("place-1", 0, RATING_MIN);
        assert_eq!(low.get_rating(), 0);

        let high = Rating::new("place-1", 0, RATING_MAX);
        assert_eq!(high.get_rating(), 5);
    }

    #[test]
    #[should_panic(expected = "Rating must be between 0 and 5")]
    fn test_rating_new_panics_above_range() {
        let _ = Rating::new("place-1", 0, 6);
    }

    #[test]
    #[should_panic(expected = "Rating must be between 0 and 5")]
    fn test_rating_new_panics_below_range() {
        let _ = Rating::new("place-1", 0, -1);
    }

    #[test]
    fn test_validate_rating_value() {
        for value in RATING_MIN..=RATING_MAX {
            assert!(validate_rating_value(value).is_ok());
        }

        let err = validate_rating_value(6).unwrap_err();
        assert!(matches!(err, ValidationError::RatingOutOfRange(6)));

        let err = validate_rating_value(-1).unwrap_err();
        assert!(matches!(err, ValidationError::RatingOutOfRange(-1)));
    }

    #[test]
    fn test_set_rating_touches_updated_dt() {
        let mut rating = Rating::new("place-1", 0, 2);
        let created = rating.get_created_dt_raw();

        std::thread::sleep(std::time::Duration::from_millis(10));
        rating.set_rating(5);

        assert_eq!(rating.get_rating(), 5);
        assert_eq!(rating.get_created_dt_raw(), created);
        assert!(rating.get_updated_dt_raw() > created);
    }

    #[test]
    fn test_set_deleted_flg_leaves_updated_dt() {
        let mut rating = Rating::new("place-1", 0, 2);
        let updated = rating.get_updated_dt_raw();

        std::thread::sleep(std::time::Duration::from_millis(10));
        rating.set_deleted_flg(true);

        assert!(rating.get_deleted_flg());
        assert_eq!(rating.get_updated_dt_raw(), updated);
    }
}
