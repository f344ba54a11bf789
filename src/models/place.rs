use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::ValidationError;

/// Southern edge of the covered region
pub const LATITUDE_MIN: f64 = 55.515174;
/// Northern edge of the covered region
pub const LATITUDE_MAX: f64 = 56.106229;
/// Western edge of the covered region
pub const LONGITUDE_MIN: f64 = 36.994695;
/// Eastern edge of the covered region
pub const LONGITUDE_MAX: f64 = 37.956703;

/// Checks that a coordinate pair lies inside the covered region
///
/// Both bounds of each axis are inclusive. The latitude is checked first,
/// so a pair that is off on both axes reports the latitude.
///
/// ### Arguments
///
/// * `latitude` - The latitude to check
/// * `longitude` - The longitude to check
///
/// ### Errors
///
/// Returns `ValidationError::LatitudeOutOfBounds` or
/// `ValidationError::LongitudeOutOfBounds` carrying the offending value.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfBounds(latitude));
    }
    if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfBounds(longitude));
    }
    Ok(())
}

/// Verification tier of a place, derived from its accept count
///
/// The count includes soft-deleted accepts; see
/// `repo::count_accepts_for_place`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptType {
    /// Fewer than 50 accepts
    #[serde(rename = "unverified")]
    Unverified,

    /// 50 to 99 accepts
    #[serde(rename = "weakly verified")]
    WeaklyVerified,

    /// 100 to 199 accepts
    #[serde(rename = "verified by many")]
    VerifiedByMany,

    /// 200 accepts or more
    #[serde(rename = "verified")]
    Verified,
}

impl AcceptType {
    /// Derives the tier from an accept count
    ///
    /// ### Arguments
    ///
    /// * `count` - The number of accepts a place has
    ///
    /// ### Returns
    ///
    /// The tier the count falls into
    pub fn from_count(count: i64) -> Self {
        match count {
            c if c < 50 => AcceptType::Unverified,
            c if c < 100 => AcceptType::WeaklyVerified,
            c if c < 200 => AcceptType::VerifiedByMany,
            _ => AcceptType::Verified,
        }
    }

    /// Gets the tier's display label
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptType::Unverified => "unverified",
            AcceptType::WeaklyVerified => "weakly verified",
            AcceptType::VerifiedByMany => "verified by many",
            AcceptType::Verified => "verified",
        }
    }
}

impl fmt::Display for AcceptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a place inside the covered region
///
/// This struct maps directly to the `places` table in the database. Accepts,
/// ratings and images reference a place by its id; they are removed with it
/// only on physical deletion, never on a soft delete.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::places)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Place {
    /// Unique identifier for the place (UUID v4 as string)
    id: String,

    /// Display name of the place
    name: String,

    /// Latitude, inside [LATITUDE_MIN, LATITUDE_MAX]
    latitude: f64,

    /// Longitude, inside [LONGITUDE_MIN, LONGITUDE_MAX]
    longitude: f64,

    /// Free-form postal address
    address: String,

    /// Id of the user who created the place, non-negative
    created_by: i32,

    /// When this place was created
    created_dt: NaiveDateTime,

    /// Soft-delete marker
    deleted_flg: bool,
}

impl Place {
    /// Creates a new place
    ///
    /// This method automatically generates a UUID v4 for the ID, sets the
    /// created_dt timestamp to the current time and leaves the place active.
    /// Coordinates are NOT checked here; run `validate_coordinates` before
    /// persisting.
    ///
    /// ### Arguments
    ///
    /// * `name` - Display name of the place
    /// * `latitude` - Latitude of the place
    /// * `longitude` - Longitude of the place
    /// * `address` - Postal address of the place
    /// * `created_by` - Id of the creating user
    ///
    /// ### Returns
    ///
    /// A new `Place` instance with the specified fields
    pub fn new(
        name: String,
        latitude: f64,
        longitude: f64,
        address: String,
        created_by: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            latitude,
            longitude,
            address,
            created_by,
            created_dt: Utc::now().naive_utc(),
            deleted_flg: false,
        }
    }

    /// Creates a new place with all fields specified
    ///
    /// This method is primarily used for testing and database deserialization.
    ///
    /// ### Arguments
    ///
    /// * `id` - The unique identifier for the place
    /// * `name` - Display name of the place
    /// * `latitude` - Latitude of the place
    /// * `longitude` - Longitude of the place
    /// * `address` - Postal address of the place
    /// * `created_by` - Id of the creating user
    /// * `created_dt` - When the place was created
    /// * `deleted_flg` - Whether the place is soft-deleted
    ///
    /// ### Returns
    ///
    /// A new `Place` instance with the specified fields
    pub fn new_with_fields(
        id: String,
        name: String,
        latitude: f64,
        longitude: f64,
        address: String,
        created_by: i32,
        created_dt: DateTime<Utc>,
        deleted_flg: bool,
    ) -> Self {
        Self {
            id,
            name,
            latitude,
            longitude,
            address,
            created_by,
            created_dt: created_dt.naive_utc(),
            deleted_flg,
        }
    }

    /// Gets the place's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the place's name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Sets the place's name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Gets the place's latitude
    pub fn get_latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the place's longitude
    pub fn get_longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the place's address
    pub fn get_address(&self) -> String {
        self.address.clone()
    }

    /// Sets the place's address
    pub fn set_address(&mut self, address: String) {
        self.address = address;
    }

    /// Gets the id of the user who created the place
    pub fn get_created_by(&self) -> i32 {
        self.created_by
    }

    /// Gets the place's creation timestamp as a DateTime<Utc>
    pub fn get_created_dt(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_dt, Utc)
    }

    /// Gets the place's raw creation timestamp
    pub fn get_created_dt_raw(&self) -> NaiveDateTime {
        self.created_dt
    }

    /// Gets whether the place is soft-deleted
    pub fn get_deleted_flg(&self) -> bool {
        self.deleted_flg
    }

    /// Sets the place's soft-delete marker
    pub fn set_deleted_flg(&mut self, deleted_flg: bool) {
        self.deleted_flg = deleted_flg;
    }
}
