use serde::{Deserialize, Serialize};

use crate::models::AcceptType;

/// Data transfer object for creating a new place
///
/// This struct is used to deserialize JSON requests for creating places.
#[derive(Deserialize, Debug)]
pub struct CreatePlaceDto {
    /// Display name of the place
    pub name: String,

    /// Latitude of the place, inside the covered region
    pub latitude: f64,

    /// Longitude of the place, inside the covered region
    pub longitude: f64,

    /// Free-form postal address
    pub address: String,

    /// Id of the creating user
    pub created_by: i32,
}

/// Data transfer object for recording an accept
///
/// This struct is used to deserialize JSON requests for accepting places.
#[derive(Deserialize, Debug)]
pub struct CreateAcceptDto {
    /// Id of the accepting user
    pub created_by: i32,
}

/// Data transfer object for creating a new rating
///
/// This struct is used to deserialize JSON requests for rating places.
#[derive(Deserialize, Debug)]
pub struct CreateRatingDto {
    /// Id of the rating user
    pub created_by: i32,

    /// The score given, between 0 and 5
    pub rating: i32,
}

/// Data transfer object for attaching an image to a place
///
/// This struct is used to deserialize JSON requests for attaching images.
#[derive(Deserialize, Debug)]
pub struct CreatePlaceImageDto {
    /// Id of the attaching user
    pub created_by: i32,

    /// External picture identifier
    pub pic_id: i32,
}

/// Data transfer object for changing a rating's score
///
/// This struct is used to deserialize JSON requests for updating ratings.
#[derive(Deserialize, Debug)]
pub struct UpdateRatingDto {
    /// The new score, between 0 and 5
    pub rating: i32,
}

/// Data transfer object for list queries
///
/// Lists return active rows by default; `include_deleted=true` widens them
/// to every row, soft-deleted ones included.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct ListQueryDto {
    /// Whether soft-deleted rows are included
    pub include_deleted: bool,
}

/// Derived metrics for a single place
///
/// Computed on demand from the place's children; nothing here is stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaceSummaryDto {
    /// The ID of the summarized place
    pub place_id: String,

    /// Mean score over the place's non-deleted ratings, 0 when there are none
    pub rating: f64,

    /// Number of accepts, soft-deleted ones included
    pub accepts_cnt: i64,

    /// Verification tier derived from accepts_cnt
    pub accept_type: AcceptType,
}
