//! Test helpers for web API tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum_test::{TestServer, TestServerConfig};
use serde_json::{json, Value};

use tutorhub::auth::SessionStore;
use tutorhub::web::handlers::AppState;
use tutorhub::web::router::create_app;
use tutorhub::Database;

/// Create a test server over an in-memory database with a seeded catalog.
///
/// Cookies are saved between requests so the `sid` session cookie behaves
/// like a browser's.
pub async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    seed_catalog(&db).await;

    let app_state = AppState::new(db.clone(), SessionStore::default());
    let router = create_app(app_state, &[]);

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    let server = TestServer::new_with_config(router, config).expect("Failed to create test server");

    (server, db)
}

/// Seed majors and courses used across tests.
pub async fn seed_catalog(db: &Database) {
    for sql in [
        "INSERT INTO majors (short_name, long_name) VALUES ('CSC', 'Computer Science')",
        "INSERT INTO majors (short_name, long_name) VALUES ('MATH', 'Mathematics')",
        "INSERT INTO courses (major_id, number, title) VALUES (1, '415', 'Operating Systems')",
        "INSERT INTO courses (major_id, number, title) VALUES (1, '648', 'Software Engineering')",
        "INSERT INTO courses (major_id, number, title) VALUES (2, '226', 'Calculus I')",
    ] {
        sqlx::query(sql)
            .execute(db.pool())
            .await
            .expect("Failed to seed catalog");
    }
}

/// Register a user through the API.
pub async fn register_user(server: &TestServer, email: &str, first: &str, last: &str) -> Value {
    let response = server
        .post("/register")
        .form(&json!({
            "email": email,
            "password": "test-password-1",
            "first_name": first,
            "last_name": last,
            "major_dropdown": "CSC",
        }))
        .await;
    response.json::<Value>()
}

/// Log in through the API with the default test password.
pub async fn login_user(server: &TestServer, email: &str) -> Value {
    let response = server
        .post("/login")
        .form(&json!({
            "userEmail": email,
            "enteredPassword": "test-password-1",
        }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Register and log in, returning the user id.
pub async fn register_and_login(server: &TestServer, email: &str, first: &str, last: &str) -> i64 {
    let registered = register_user(server, email, first, last).await;
    let user_id = registered["data"]["user"]["id"]
        .as_i64()
        .expect("registration should return a user id");
    login_user(server, email).await;
    user_id
}

/// A small valid PNG for upload tests, wider than the thumbnail target.
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode test image");
    out.into_inner()
}

/// Insert an approved tutor post directly, returning its id.
pub async fn insert_approved_post(
    db: &Database,
    user_id: i64,
    course_id: i64,
    details: &str,
    created_at: &str,
) -> i64 {
    let result = sqlx::query(
        "INSERT INTO tutor_posts (user_id, course_id, details, admin_approved, created_at)
         VALUES (?, ?, ?, 1, ?)",
    )
    .bind(user_id)
    .bind(course_id)
    .bind(details)
    .bind(created_at)
    .execute(db.pool())
    .await
    .expect("Failed to insert post");
    result.last_insert_rowid()
}
