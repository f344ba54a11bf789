/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for interacting with the database, including
/// creating, retrieving, soft-deleting and summarizing places and their
/// accepts, ratings and images.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.
/// Listing functions come in pairs: `list_*` returns every row and
/// `list_active_*` only the rows that are not soft-deleted; nothing
/// filters implicitly.

mod place_repo;
mod accept_repo;
mod rating_repo;
mod place_image_repo;

// Re-export all repository functions
pub use place_repo::*;
pub use accept_repo::*;
pub use rating_repo::*;
pub use place_image_repo::*;
