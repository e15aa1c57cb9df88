//! Integration tests for the SchoolReg HTTP API.
//!
//! Uses axum-test for in-process requests and tempfile for storage.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use schoolreg::api::{AppState, create_router};
use schoolreg::config::{ServerConfig, StorageConfig};
use serde_json::Value;
use tempfile::TempDir;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-body";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

struct Harness {
    server: TestServer,
    temp: TempDir,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    fn with_config(config: ServerConfig) -> Self {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = storage_in(&temp);
        let state = AppState::open(&storage).unwrap();
        let router = create_router(state, &config).unwrap();
        let server = TestServer::new(router).unwrap();
        Self { server, temp }
    }

    fn image_dir(&self) -> std::path::PathBuf {
        storage_in(&self.temp).image_store().dir().to_path_buf()
    }

    fn stored_images(&self) -> usize {
        std::fs::read_dir(self.image_dir()).unwrap().count()
    }

    fn database(&self) -> std::path::PathBuf {
        storage_in(&self.temp).database
    }
}

fn storage_in(temp: &TempDir) -> StorageConfig {
    StorageConfig::new(temp.path().join("schools.db"), temp.path().join("public"))
}

fn image_part() -> Part {
    Part::bytes(Bytes::from_static(PNG_BYTES))
        .file_name("campus.png")
        .mime_type("image/png")
}

/// A complete, valid form.
fn school_form(name: &str) -> MultipartForm {
    form_without(name, None)
}

/// A complete form minus one field (`"image"` drops the file).
fn form_without(name: &str, skip: Option<&str>) -> MultipartForm {
    let fields = [
        ("name", name),
        ("address", "9 Temple Street"),
        ("city", "Madurai"),
        ("state", "Tamil Nadu"),
        ("contact", "4522345678"),
        ("email_id", "office@templestreet.edu"),
    ];
    let mut form = MultipartForm::new();
    for (field, value) in fields {
        if Some(field) != skip {
            form = form.add_text(field, value);
        }
    }
    if skip != Some("image") {
        form = form.add_part("image", image_part());
    }
    form
}

fn form_with(overrides: &[(&str, &str)]) -> MultipartForm {
    let base = [
        ("name", "Override School"),
        ("address", "1 Road"),
        ("city", "Agra"),
        ("state", "UP"),
        ("contact", "5622345678"),
        ("email_id", "hello@override.in"),
    ];
    let mut form = MultipartForm::new();
    for (field, default) in base {
        let value = overrides
            .iter()
            .find(|(k, _)| *k == field)
            .map(|(_, v)| *v)
            .unwrap_or(default);
        form = form.add_text(field, value);
    }
    form.add_part("image", image_part())
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_health() {
    let h = Harness::new();
    let response = h.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// PAGES
// =============================================================================

#[tokio::test]
async fn test_add_school_page_is_served() {
    let h = Harness::new();
    let response = h.server.get("/").await;
    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let page = response.text();
    assert!(page.contains("<form"));
    for field in ["name", "address", "city", "state", "contact", "email_id", "image"] {
        assert!(page.contains(&format!("name=\"{field}\"")), "field {field}");
    }
    assert!(page.contains("/api/schools"));
    assert!(page.contains("/showSchools"));
}

#[tokio::test]
async fn test_show_schools_page_is_served() {
    let h = Harness::new();
    let response = h.server.get("/showSchools").await;
    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let page = response.text();
    assert!(page.contains("/api/schools"));
    assert!(page.contains("/schoolImages/"));
    assert!(page.contains("No Schools Found"));
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn test_create_then_list() {
    let h = Harness::new();

    let response = h.server.post("/api/schools").multipart(school_form("Temple Street School")).await;
    response.assert_status_ok();
    let created: Value = response.json();
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "School added successfully");
    let id = created["schoolId"].as_i64().unwrap();

    let listed: Value = h.server.get("/api/schools").await.json();
    assert_eq!(listed["success"], true);
    let schools = listed["schools"].as_array().unwrap();
    assert_eq!(schools.len(), 1);
    let school = &schools[0];
    assert_eq!(school["id"].as_i64(), Some(id));
    assert_eq!(school["name"], "Temple Street School");
    assert_eq!(school["city"], "Madurai");
    assert_eq!(school["contact"], "4522345678");
    assert_eq!(school["email_id"], "office@templestreet.edu");
    assert!(school["created_at"].is_string());

    let image = school["image"].as_str().unwrap();
    assert!(image.starts_with("school_"));
    assert!(image.ends_with(".png"));
}

#[tokio::test]
async fn test_uploaded_image_is_stored_and_served() {
    let h = Harness::new();
    h.server
        .post("/api/schools")
        .multipart(school_form("Served Image School"))
        .await
        .assert_status_ok();

    let listed: Value = h.server.get("/api/schools").await.json();
    let image = listed["schools"][0]["image"].as_str().unwrap().to_owned();

    let on_disk = std::fs::read(h.image_dir().join(&image)).unwrap();
    assert_eq!(on_disk, PNG_BYTES);

    let response = h.server.get(&format!("/schoolImages/{image}")).await;
    response.assert_status_ok();
    assert_eq!(response.into_bytes(), Bytes::from_static(PNG_BYTES));
}

#[tokio::test]
async fn test_unknown_fields_are_ignored() {
    let h = Harness::new();
    let form = school_form("Extra Field School").add_text("principal", "Dr. Iyer");
    h.server.post("/api/schools").multipart(form).await.assert_status_ok();
}

// =============================================================================
// VALIDATION
// =============================================================================

#[tokio::test]
async fn test_missing_each_field_is_bad_request() {
    let h = Harness::new();
    for field in ["name", "address", "city", "state", "contact", "email_id", "image"] {
        let response = h
            .server
            .post("/api/schools")
            .multipart(form_without("Incomplete", Some(field)))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "All fields are required", "missing {field}");
    }

    let listed: Value = h.server.get("/api/schools").await.json();
    assert!(listed["schools"].as_array().unwrap().is_empty());
    assert_eq!(h.stored_images(), 0);
}

#[tokio::test]
async fn test_malformed_email_is_bad_request() {
    let h = Harness::new();
    let response = h
        .server
        .post("/api/schools")
        .multipart(form_with(&[("email_id", "office.at.school")]))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn test_non_numeric_contact_is_bad_request() {
    let h = Harness::new();
    let response = h
        .server
        .post("/api/schools")
        .multipart(form_with(&[("contact", "+91 98765")]))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Contact number must contain only digits");
}

#[tokio::test]
async fn test_image_without_extension_is_bad_request() {
    let h = Harness::new();
    let form = form_without("No Extension", Some("image")).add_part(
        "image",
        Part::bytes(Bytes::from_static(PNG_BYTES)).file_name("campus"),
    );
    let response = h.server.post("/api/schools").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Image file must have a valid extension");
}

#[tokio::test]
async fn test_html_upload_is_bad_request() {
    let h = Harness::new();
    let form = form_without("Script School", Some("image")).add_part(
        "image",
        Part::bytes(Bytes::from_static(b"<script>alert(document.cookie)</script>"))
            .file_name("x.html")
            .mime_type("text/html"),
    );
    let response = h.server.post("/api/schools").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Image file must have a valid extension");
    assert_eq!(h.stored_images(), 0);
}

#[tokio::test]
async fn test_padded_contact_is_bad_request() {
    let h = Harness::new();
    let response = h
        .server
        .post("/api/schools")
        .multipart(form_with(&[("contact", " 123 ")]))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Contact number must contain only digits");
}

#[tokio::test]
async fn test_padded_email_is_bad_request() {
    let h = Harness::new();
    let response = h
        .server
        .post("/api/schools")
        .multipart(form_with(&[("email_id", " a@b.co")]))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid email format");
    assert_eq!(h.stored_images(), 0);
}

#[tokio::test]
async fn test_non_multipart_body_is_bad_request() {
    let h = Harness::new();
    let response = h
        .server
        .post("/api/schools")
        .json(&serde_json::json!({"name": "JSON School"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let h = Harness::with_config(ServerConfig {
        max_upload_bytes: 256,
        ..ServerConfig::default()
    });
    let big = vec![0u8; 4096];
    let form = form_without("Too Big", Some("image"))
        .add_part("image", Part::bytes(big).file_name("huge.png"));
    let response = h.server.post("/api/schools").multipart(form).await;
    assert!(response.status_code().is_client_error());
    assert_eq!(h.stored_images(), 0);
}

// =============================================================================
// STORAGE FAILURES
// =============================================================================

#[tokio::test]
async fn test_unwritable_image_dir_is_server_error() {
    let h = Harness::new();
    let dir = h.image_dir();
    std::fs::remove_dir_all(&dir).unwrap();
    std::fs::write(&dir, b"not a directory").unwrap();

    let response = h
        .server
        .post("/api/schools")
        .multipart(school_form("No Room School"))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to add school");
}

#[tokio::test]
async fn test_missing_table_is_server_error() {
    let h = Harness::new();
    let conn = rusqlite::Connection::open(h.database()).unwrap();
    conn.execute_batch("DROP TABLE schools;").unwrap();
    drop(conn);

    let response = h.server.get("/api/schools").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to fetch schools");
}

// =============================================================================
// LISTING
// =============================================================================

#[tokio::test]
async fn test_list_empty() {
    let h = Harness::new();
    let response = h.server.get("/api/schools").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["schools"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let h = Harness::new();
    let mut ids = Vec::new();
    for name in ["First School", "Second School", "Third School"] {
        let created: Value = h
            .server
            .post("/api/schools")
            .multipart(school_form(name))
            .await
            .json();
        ids.push(created["schoolId"].as_i64().unwrap());
    }

    let listed: Value = h.server.get("/api/schools").await.json();
    let names: Vec<&str> = listed["schools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third School", "Second School", "First School"]);

    let listed_ids: Vec<i64> = listed["schools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);
}
