use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::place_images)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlaceImage {
    /// Unique identifier for the image record (UUID v4 as string)
    id: String,

    /// The ID of the place this image belongs to
    place_id: String,

    /// Id of the user who attached the image, non-negative
    created_by: i32,

    /// External picture identifier, non-negative; no image bytes are stored
    pic_id: i32,

    /// When this image was attached
    created_dt: NaiveDateTime,

    /// Soft-delete marker
    deleted_flg: bool,
}

impl PlaceImage {
    /// Creates a new image record for a place
    ///
    /// ### Arguments
    ///
    /// * `place_id` - The ID of the place the image belongs to
    /// * `created_by` - Id of the attaching user
    /// * `pic_id` - External picture identifier
    ///
    /// ### Returns
    ///
    /// A new `PlaceImage` instance with a generated id and the current
    /// timestamp
    pub fn new(place_id: &str, created_by: i32, pic_id: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            place_id: place_id.to_string(),
            created_by,
            pic_id,
            created_dt: Utc::now().naive_utc(),
            deleted_flg: false,
        }
    }

    /// Creates a new image record with all fields specified
    ///
    /// ### Arguments
    ///
    /// * `id` - The unique identifier for the image record
    /// * `place_id` - The ID of the place this image belongs to
    /// * `created_by` - Id of the attaching user
    /// * `pic_id` - External picture identifier
    /// * `created_dt` - When the image was attached
    /// * `deleted_flg` - Whether the image is soft-deleted
    ///
    /// ### Returns
    ///
    /// A new `PlaceImage` instance with the specified fields
    pub fn new_with_fields(
        id: String,
        place_id: String,
        created_by: i32,
        pic_id: i32,
        created_dt: DateTime<Utc>,
        deleted_flg: bool,
    ) -> Self {
        Self {
            id,
            place_id,
            created_by,
            pic_id,
            created_dt: created_dt.naive_utc(),
            deleted_flg,
        }
    }

    /// Gets the image record's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the ID of the place this image belongs to
    pub fn get_place_id(&self) -> String {
        self.place_id.clone()
    }

    /// Gets the id of the user who attached the image
    pub fn get_created_by(&self) -> i32 {
        self.created_by
    }

    /// Gets the external picture identifier
    pub fn get_pic_id(&self) -> i32 {
        self.pic_id
    }

    /// Sets the external picture identifier
    pub fn set_pic_id(&mut self, pic_id: i32) {
        self.pic_id = pic_id;
    }

    /// Gets the image's creation timestamp as a DateTime<Utc>
    pub fn get_created_dt(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_dt, Utc)
    }

    /// Gets the image's raw creation timestamp
    pub fn get_created_dt_raw(&self) -> NaiveDateTime {
        self.created_dt
    }

    /// Gets whether the image is soft-deleted
    pub fn get_deleted_flg(&self) -> bool {
        self.deleted_flg
    }

    /// Sets the image's soft-delete marker
    pub fn set_deleted_flg(&mut self, deleted_flg: bool) {
        self.deleted_flg = deleted_flg;
    }
}
