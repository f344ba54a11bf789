use crate::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use diesel::RunQueryDsl;
use diesel::connection::SimpleConnection;
use proptest::prelude::*;
use std::sync::Arc;
use tower::ServiceExt;

/// Sets up a test database with migrations applied
///
/// This function:
/// 1. Creates an in-memory SQLite database
/// 2. Enables foreign key constraints
/// 3. Runs all migrations to set up the schema
///
/// ### Returns
///
/// An Arc-wrapped database connection pool connected to the in-memory database
pub fn setup_test_db() -> Arc<db::DbPool> {
    // Use a unique shared in-memory database for each test.
    // Plain ":memory:" gives each connection its own separate database,
    // so migrations run on one connection wouldn't be visible on others.
    // By using a unique URI with cache=shared, all connections in this pool
    // share the same in-memory database while remaining isolated from other tests.
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url);

    // Get a connection from the pool
    let mut conn = pool.get().expect("Failed to get connection");

    // Enable foreign key constraints for SQLite
    conn.batch_execute("PRAGMA foreign_keys = ON").unwrap();

    // Run all migrations to set up the schema
    run_migrations(&mut conn);

    // Wrap the pool in an Arc for thread-safe sharing
    Arc::new(pool)
}


use diesel::QueryableByName;
use diesel::sql_types::Text;

#[derive(QueryableByName, Debug)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Tests the setup_test_db function
///
/// This test verifies that:
/// 1. The test database can be created and connected to
/// 2. The database has the expected tables
/// 3. The database can be queried successfully
#[tokio::test]
async fn test_setup_test_db() {
    let pool = setup_test_db();
    assert!(pool.get().is_ok());

    // Check that all migrations were run, i.e. the tables were created
    let mut conn = pool.get().unwrap();
    let result = diesel::sql_query("SELECT name FROM sqlite_master WHERE type='table'")
        .execute(&mut conn);
    assert!(result.is_ok());

    println!("Result: {:?}", result);

    // Get the names of the tables
    let table_names: Vec<TableName> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type='table'")
            .load(&mut conn)
            .expect("Failed to load table names");

    println!("Tables: {:?}", table_names);

    // Verify that we have the expected tables
    assert!(table_names.len() > 0, "No tables found in the database");

    // test interacting with each of the found tables
    let expected_tables = vec![
        "places", "accepts", "ratings", "place_images",
        "__diesel_schema_migrations" // Diesel's migration tracking table
    ];

    for table in expected_tables {
        let exists = table_names.iter().any(|t| t.name == table);
        assert!(exists, "Table '{}' not found in database", table);

        // Test a simple query on each table
        let query = format!("SELECT COUNT(*) FROM {}", table);
        let result = diesel::sql_query(&query).execute(&mut conn);
        assert!(result.is_ok(), "Failed to query table '{}': {:?}", table, result.err());

        println!("Table '{}' exists and is queryable", table);
    }

    drop(conn);

    // test interacting with the app
    let app = create_app(pool.clone());

    // test interacting with the places table
    let request = Request::builder()
        .uri("/places")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    // send the request to the app
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "Response status is not OK (err: {:?})", axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap());
}


/// Generates a latitude inside the covered region
///
/// Uses integer-then-scale so both edges of the box are reachable
/// without floating point boundary issues.
pub fn arb_latitude() -> impl Strategy<Value = f64> {
    (0u32..=1_000_000u32).prop_map(|v| {
        (models::LATITUDE_MIN + (models::LATITUDE_MAX - models::LATITUDE_MIN) * (v as f64 / 1_000_000.0))
            .clamp(models::LATITUDE_MIN, models::LATITUDE_MAX)
    })
}

/// Generates a longitude inside the covered region
pub fn arb_longitude() -> impl Strategy<Value = f64> {
    (0u32..=1_000_000u32).prop_map(|v| {
        (models::LONGITUDE_MIN + (models::LONGITUDE_MAX - models::LONGITUDE_MIN) * (v as f64 / 1_000_000.0))
            .clamp(models::LONGITUDE_MIN, models::LONGITUDE_MAX)
    })
}

/// Generates a latitude outside the covered region, north or south of it
pub fn arb_out_of_box_latitude() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-90.0f64..55.515),
        (56.107f64..90.0),
    ]
}

/// Generates a longitude outside the covered region, east or west of it
pub fn arb_out_of_box_longitude() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-180.0f64..36.994),
        (37.957f64..180.0),
    ]
}

/// Generates a valid rating value in [0, 5]
pub fn arb_rating() -> impl Strategy<Value = i32> {
    0i32..=5i32
}

/// Generates an invalid rating value outside [0, 5]
pub fn arb_invalid_rating() -> impl Strategy<Value = i32> {
    prop_oneof![
        (i32::MIN..0),
        (6..i32::MAX),
    ]
}

/// Generates any f64 value including NaN, ±Infinity, subnormals, etc.
pub fn arb_any_f64() -> impl Strategy<Value = f64> {
    proptest::num::f64::ANY
}

/// Generates a printable string, the empty string included
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    "\\PC*"
}
