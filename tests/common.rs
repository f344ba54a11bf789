/// Common test utilities for Placemark integration tests
///
/// This file contains shared functions and utilities for all integration tests,
/// including test application setup and helper functions for creating common
/// test objects through the API.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use placemark::{
    ListQueryDto, create_app,
    db::init_pool,
    models::{Accept, Place, PlaceImage, Rating},
};
use serde_json::json;
use std::sync::Arc;
use tower::Service;

/// Creates a test application with an in-memory SQLite database
///
/// This helper function:
/// 1. Creates an in-memory SQLite database
/// 2. Runs migrations to set up the schema
/// 3. Creates an Axum application with the database
///
/// Each call uses a uniquely named shared-cache database so every pooled
/// connection sees the same data while separate tests stay isolated.
///
/// ### Returns
///
/// An Axum Router configured with all routes and connected to an in-memory database
pub fn create_test_app() -> Router {
    // A unique URI keeps parallel tests from sharing state while cache=shared
    // lets all pooled connections see the same database
    let database_url = format!(
        "file:integration_{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4()
    );
    let pool = Arc::new(init_pool(&database_url));

    // Run migrations on the in-memory database to set up the schema
    let conn = &mut pool.get().unwrap();
    placemark::run_migrations(conn);

    // Create and return the application with the configured database pool
    create_app(pool)
}

/// Creates a place via the API
///
/// This helper function:
/// 1. Sends a POST request to /places with the provided fields
/// 2. Verifies the response has a 200 OK status
/// 3. Parses and returns the created Place
///
/// ### Arguments
///
/// * `app` - The test application
/// * `name` - The name for the new place
/// * `latitude` - The latitude, which must be inside the service area
/// * `longitude` - The longitude, which must be inside the service area
///
/// ### Returns
///
/// The created Place with its ID and creation timestamp
pub async fn create_place(app: &mut Router, name: &str, latitude: f64, longitude: f64) -> Place {
    // Create a request to create a place
    let request = Request::builder()
        .uri("/places")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": name,
                "latitude": latitude,
                "longitude": longitude,
                "address": "1 Integration Street",
                "created_by": 1
            }))
            .unwrap(),
        ))
        .unwrap();

    // Send the request and get the response
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Parse the response body into a Place struct
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let place: Place = serde_json::from_slice(&body).unwrap();

    place
}

/// Lists places via the API
///
/// The query string is encoded with serde_html_form, the same format the
/// handler decodes on the other side.
///
/// ### Arguments
///
/// * `app` - The test application
/// * `include_deleted` - Whether soft-deleted places should be included
///
/// ### Returns
///
/// The places visible under the requested filter
pub async fn list_places(app: &mut Router, include_deleted: bool) -> Vec<Place> {
    // Encode the query parameters
    let query = serde_html_form::to_string(&ListQueryDto { include_deleted }).unwrap();

    // Create a request to list places
    let request = Request::builder()
        .uri(format!("/places?{}", query))
        .method("GET")
        .body(Body::empty())
        .unwrap();

    // Send the request and get the response
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Parse the response body into a vector of Place structs
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let places: Vec<Place> = serde_json::from_slice(&body).unwrap();

    places
}

/// Records an accept for a place via the API
///
/// This helper function:
/// 1. Sends a POST request to /places/{place_id}/accepts
/// 2. Verifies the response has a 200 OK status
/// 3. Parses and returns the created Accept
///
/// ### Arguments
///
/// * `app` - The test application
/// * `place_id` - The ID of the place being confirmed
/// * `created_by` - The ID of the confirming user
///
/// ### Returns
///
/// The created Accept with its ID and fields
pub async fn create_accept(app: &mut Router, place_id: &str, created_by: i32) -> Accept {
    // Create a request to record an accept
    let request = Request::builder()
        .uri(format!("/places/{}/accepts", place_id))
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "created_by": created_by
            }))
            .unwrap(),
        ))
        .unwrap();

    // Send the request and get the response
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Parse the response body into an Accept struct
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let accept: Accept = serde_json::from_slice(&body).unwrap();

    accept
}

/// Rates a place via the API
///
/// This helper function:
/// 1. Sends a POST request to /places/{place_id}/ratings
/// 2. Verifies the response has a 200 OK status
/// 3. Parses and returns the created Rating
///
/// ### Arguments
///
/// * `app` - The test application
/// * `place_id` - The ID of the place being rated
/// * `created_by` - The ID of the rating user
/// * `rating` - The value on the 0-5 scale
///
/// ### Returns
///
/// The created Rating with its ID and fields
pub async fn create_rating(
    app: &mut Router,
    place_id: &str,
    created_by: i32,
    rating: i32,
) -> Rating {
    // Create a request to rate the place
    let request = Request::builder()
        .uri(format!("/places/{}/ratings", place_id))
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "created_by": created_by,
                "rating": rating
            }))
            .unwrap(),
        ))
        .unwrap();

    // Send the request and get the response
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Parse the response body into a Rating struct
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let rating: Rating = serde_json::from_slice(&body).unwrap();

    rating
}

/// Attaches an image to a place via the API
///
/// This helper function:
/// 1. Sends a POST request to /places/{place_id}/images
/// 2. Verifies the response has a 200 OK status
/// 3. Parses and returns the created PlaceImage
///
/// ### Arguments
///
/// * `app` - The test application
/// * `place_id` - The ID of the place the image belongs to
/// * `created_by` - The ID of the uploading user
/// * `pic_id` - The external picture ID
///
/// ### Returns
///
/// The created PlaceImage with its ID and fields
pub async fn create_place_image(
    app: &mut Router,
    place_id: &str,
    created_by: i32,
    pic_id: i32,
) -> PlaceImage {
    // Create a request to attach an image
    let request = Request::builder()
        .uri(format!("/places/{}/images", place_id))
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "created_by": created_by,
                "pic_id": pic_id
            }))
            .unwrap(),
        ))
        .unwrap();

    // Send the request and get the response
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Parse the response body into a PlaceImage struct
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let image: PlaceImage = serde_json::from_slice(&body).unwrap();

    image
}
