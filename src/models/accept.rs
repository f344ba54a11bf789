use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::accepts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Accept {
    /// Unique identifier for the accept (UUID v4 as string)
    id: String,

    /// The ID of the place this accept belongs to
    place_id: String,

    /// Id of the user who accepted the place, non-negative
    created_by: i32,

    /// When this accept was recorded
    created_dt: NaiveDateTime,

    /// Soft-delete marker
    deleted_flg: bool,
}

impl Accept {
    /// Creates a new accept for a place
    ///
    /// ### Arguments
    ///
    /// * `place_id` - The ID of the place being accepted
    /// * `created_by` - Id of the accepting user
    ///
    /// ### Returns
    ///
    /// A new `Accept` instance with a generated id and the current timestamp
    pub fn new(place_id: &str, created_by: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            place_id: place_id.to_string(),
            created_by,
            created_dt: Utc::now().naive_utc(),
            deleted_flg: false,
        }
    }

    /// Creates a new accept with all fields specified
    ///
    /// ### Arguments
    ///
    /// * `id` - The unique identifier for the accept
    /// * `place_id` - The ID of the place this accept belongs to
    /// * `created_by` - Id of the accepting user
    /// * `created_dt` - When the accept was recorded
    /// * `deleted_flg` - Whether the accept is soft-deleted
    ///
    /// ### Returns
    ///
    /// A new `Accept` instance with the specified fields
    pub fn new_with_fields(
        id: String,
        place_id: String,
        created_by: i32,
        created_dt: DateTime<Utc>,
        deleted_flg: bool,
    ) -> Self {
        Self {
            id,
            place_id,
            created_by,
            created_dt: created_dt.naive_utc(),
            deleted_flg,
        }
    }

    /// Gets the accept's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the place this accept belongs to
    pub fn get_place_id(&self) -> String {
        self.place_id.clone()
    }

    /// Gets the id of the user who recorded the accept
    pub fn get_created_by(&self) -> i32 {
        self.created_by
    }

    /// Gets the accept's creation timestamp as a DateTime<Utc>
    pub fn get_created_dt(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_dt, Utc)
    }

    /// Gets the accept's raw creation timestamp
    pub fn get_created_dt_raw(&self) -> NaiveDateTime {
        self.created_dt
    }

    /// Gets whether the accept is soft-deleted
    pub fn get_deleted_flg(&self) -> bool {
        self.deleted_flg
    }

    /// Sets the accept's soft-delete marker
    pub fn set_deleted_flg(&mut self, deleted_flg: bool) {
        self.deleted_flg = deleted_flg;
    }
}
