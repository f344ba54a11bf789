/// Placemark: A Regional Place Registry Library
///
/// This library provides the core functionality for a registry of places in
/// the Moscow region, including data models, database access, and a web API.
///
/// Places live inside a fixed geographic bounding box and carry user
/// confirmations (accepts), 0-5 ratings, and image references. Deleting
/// through the API only flags rows, so history survives deletion.
///
/// ### Modules
///
/// - `config`: Configuration loading
/// - `db`: Database connection management
/// - `dto`: Request and response payloads
/// - `errors`: API error types
/// - `handlers`: Web API request handlers
/// - `models`: Data structures representing places and their child records
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following endpoints:
///
/// - `POST /places`: Create a new place
/// - `GET /places`: List places
/// - `GET /places/{id}`: Get a specific place by ID
/// - `DELETE /places/{id}`: Soft-delete a place
/// - `GET /places/{id}/summary`: Get a place's derived metrics
/// - `POST /places/{id}/accepts`: Record an accept for a place
/// - `GET /places/{id}/accepts`: List the accepts of a place
/// - `POST /places/{id}/ratings`: Rate a place
/// - `GET /places/{id}/ratings`: List the ratings of a place
/// - `POST /places/{id}/images`: Attach an image to a place
/// - `GET /places/{id}/images`: List the images of a place
/// - `GET /accepts/{id}`: Get a specific accept by ID
/// - `DELETE /accepts/{id}`: Soft-delete an accept
/// - `GET /ratings/{id}`: Get a specific rating by ID
/// - `PUT /ratings/{id}`: Change the value of a rating
/// - `DELETE /ratings/{id}`: Soft-delete a rating
/// - `GET /images/{id}`: Get a specific image record by ID
/// - `DELETE /images/{id}`: Soft-delete an image record

/// Configuration loading module
pub mod config;

/// Database connection module
pub mod db;

/// Data transfer objects for the web API
pub mod dto;

/// API error types module
pub mod errors;

/// Web API handlers module
pub mod handlers;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

/// Shared test helpers and proptest strategies
#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use dto::{
    CreateAcceptDto, CreatePlaceDto, CreatePlaceImageDto, CreateRatingDto, ListQueryDto,
    PlaceSummaryDto, UpdateRatingDto,
};

use handlers::*;

/// Creates the application router with all routes
///
/// This function sets up the Axum router with all the API endpoints.
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        // Route for creating and listing places
        .route("/places", post(create_place_handler).get(list_places_handler))
        // Route for getting and soft-deleting a specific place by ID
        .route("/places/{id}", get(get_place_handler).delete(soft_delete_place_handler))
        // Route for getting a place's derived metrics
        .route("/places/{id}/summary", get(get_place_summary_handler))
        // Route for recording and listing accepts for a place
        .route("/places/{id}/accepts", post(create_accept_handler).get(list_accepts_handler))
        // Route for rating a place and listing its ratings
        .route("/places/{id}/ratings", post(create_rating_handler).get(list_ratings_handler))
        // Route for attaching images to a place and listing them
        .route("/places/{id}/images", post(create_place_image_handler).get(list_place_images_handler))
        // Route for getting and soft-deleting a specific accept by ID
        .route("/accepts/{id}", get(get_accept_handler).delete(soft_delete_accept_handler))
        // Route for getting, updating and soft-deleting a specific rating by ID
        .route(
            "/ratings/{id}",
            get(get_rating_handler)
                .put(update_rating_handler)
                .delete(soft_delete_rating_handler),
        )
        // Route for getting and soft-deleting a specific image record by ID
        .route("/images/{id}", get(get_place_image_handler).delete(soft_delete_place_image_handler))
        // Allow cross-origin requests from any frontend
        .layer(CorsLayer::permissive())
        // Add the database pool to the application state
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// This function applies all database migrations to set up the schema. It is
/// used at server startup and in tests.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    // Define the embedded migrations
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    // Run all pending migrations
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}
