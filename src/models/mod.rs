/// Data models module
///
/// This module defines the core data structures used throughout the application.
/// It includes database models that map to database tables, the typed
/// validation functions run before persistence, and the derived verification
/// tier.

// Re-export all model types
mod place;
pub use place::{
    AcceptType, LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN, Place,
    validate_coordinates,
};

mod accept;
pub use accept::Accept;

mod rating;
pub use rating::{RATING_MAX, RATING_MIN, Rating, validate_rating_value};

mod place_image;
pub use place_image::PlaceImage;
