//! Drives the full router with in-memory stores and a temporary upload dir.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, AppState};
use service::auth::domain::NewAdmin;
use service::auth::repository::{mock::MockAdminRepository, AdminRepository};
use service::auth::service::hash_password;
use service::auth::AuthService;
use service::upload::local::LocalImageStore;

const MAX_BYTES: usize = 2 * 1024 * 1024;
const BOUNDARY: &str = "----site-admin-test-boundary";
const HOST: &str = "admin.test";
const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H', b'D', b'R'];

struct TestApp {
    router: Router,
    upload_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

async fn app() -> TestApp {
    let upload_dir = std::env::temp_dir().join(format!("site_admin_uploads_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&upload_dir).unwrap();

    let admins = Arc::new(MockAdminRepository::default());
    admins
        .create(NewAdmin { username: "editor".into(), password_hash: hash_password("editor-pw").unwrap(), is_admin: false })
        .await
        .unwrap();
    let mut state = AppState::in_memory(Arc::new(LocalImageStore::new(&upload_dir, MAX_BYTES)), None);
    let admins: Arc<dyn AdminRepository> = admins;
    state.auth = AuthService::new(admins);
    assert!(state.auth.bootstrap_admin("admin", "s3cret-pass").await.unwrap());

    let router = routes::build_router(state, CorsLayer::very_permissive(), Some(upload_dir.clone()));
    TestApp { router, upload_dir }
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, body)
    }

    async fn raw(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        (status, resp.into_body().collect().await.unwrap().to_bytes().to_vec())
    }

    fn stored_files(&self) -> usize {
        std::fs::read_dir(&self.upload_dir).unwrap().count()
    }
}

fn json_req(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).header(header::HOST, HOST).body(Body::empty()).unwrap()
}

struct FilePart<'a> {
    file_name: &'a str,
    content_type: &'a str,
    bytes: &'a [u8],
}

fn multipart_req(method: Method, uri: &str, fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
    }
    if let Some(f) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                f.file_name, f.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(f.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn png_part(bytes: &[u8]) -> Option<FilePart<'_>> {
    Some(FilePart { file_name: "banner.png", content_type: "image/png", bytes })
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = app.send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn login_checks_password_and_admin_flag() {
    let app = app().await;
    let (status, body) = app
        .send(json_req(Method::POST, "/api/login", json!({ "username": "admin", "password": "s3cret-pass" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Login successful", "isAdmin": true }));

    let (status, body) = app
        .send(json_req(Method::POST, "/api/login", json!({ "username": "admin", "password": "wrong" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, body) = app
        .send(json_req(Method::POST, "/api/login", json!({ "username": "editor", "password": "editor-pw" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized: Only admins can login");
}

#[tokio::test]
async fn advertisement_without_title_is_rejected_and_not_stored() {
    let app = app().await;
    let (status, body) = app
        .send(multipart_req(Method::POST, "/api/advertisements", &[("description", "Big sale")], png_part(PNG)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "title is required");

    let (status, body) = app
        .send(json_req(Method::POST, "/api/services", json!({ "title": "Plumbing" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "description is required");

    assert_eq!(app.send(get("/api/advertisements")).await.1, json!([]));
    assert_eq!(app.send(get("/api/services")).await.1["totalCount"], 0);
    assert_eq!(app.stored_files(), 0);
}

#[tokio::test]
async fn uploaded_image_url_serves_original_bytes() {
    let app = app().await;
    let (status, ad) = app
        .send(multipart_req(
            Method::POST,
            "/api/advertisements",
            &[("title", "Spring sale"), ("description", "Everything half off")],
            png_part(PNG),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let url = ad["image"].as_str().unwrap();
    let path = url.strip_prefix(&format!("http://{HOST}")).unwrap();
    assert!(path.starts_with("/uploads/") && path.ends_with(".png"));

    let (status, bytes) = app.raw(get(path)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, PNG);

    let (status, body) = app.send(multipart_req(Method::POST, "/api/upload", &[], png_part(PNG))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], url);
}

#[tokio::test]
async fn oversized_or_unsupported_uploads_are_rejected_before_storing() {
    let app = app().await;
    let mut big = PNG.to_vec();
    big.resize(MAX_BYTES + 1, 0);
    let (status, body) = app.send(multipart_req(Method::POST, "/api/upload", &[], png_part(&big))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("File too large"));

    let pdf = FilePart { file_name: "doc.pdf", content_type: "application/pdf", bytes: b"%PDF-1.7" };
    let (status, _) = app
        .send(multipart_req(Method::POST, "/api/advertisements", &[("title", "t"), ("description", "d")], Some(pdf)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // declared png, actually text
    let fake = FilePart { file_name: "x.png", content_type: "image/png", bytes: b"hello world" };
    let (status, _) = app.send(multipart_req(Method::POST, "/api/upload", &[], Some(fake))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.send(multipart_req(Method::POST, "/api/upload", &[("note", "x")], None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No file uploaded");

    assert_eq!(app.stored_files(), 0);
    assert_eq!(app.send(get("/api/advertisements")).await.1, json!([]));
}

#[tokio::test]
async fn upload_without_multipart_boundary_is_a_bad_request() {
    let app = app().await;
    let (status, body) = app.send(json_req(Method::POST, "/api/upload", json!({ "image": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/advertisements")
        .header(header::HOST, HOST)
        .header(header::CONTENT_TYPE, "multipart/form-data")
        .body(Body::from("title=t"))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert_eq!(app.send(get("/api/advertisements")).await.1, json!([]));
}

#[tokio::test]
async fn bulk_delete_requires_a_proper_id_list() {
    let app = app().await;
    let (_, ad) = app
        .send(json_req(
            Method::POST,
            "/api/advertisements",
            json!({ "title": "t", "description": "d", "image": "https://cdn.test/a.png" }),
        ))
        .await;

    for bad in [json!({ "ids": [] }), json!({ "ids": "nope" }), json!({}), json!({ "ids": ["not-a-uuid"] })] {
        let (status, body) = app.send(json_req(Method::DELETE, "/api/advertisements", bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
    assert_eq!(app.send(get("/api/advertisements")).await.1.as_array().unwrap().len(), 1);

    let (status, body) = app
        .send(json_req(Method::DELETE, "/api/advertisements", json!({ "ids": [ad["id"], Uuid::new_v4()] })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
    assert_eq!(app.send(get("/api/advertisements")).await.1, json!([]));
}

#[tokio::test]
async fn enquiry_resubmission_keeps_one_record_with_latest_message() {
    let app = app().await;
    let enquiry = |message: &str| {
        json!({
            "name": "Jane", "email": "jane@example.com", "mobile": "5550100",
            "subject": "Quote", "address": "1 Main St", "message": message
        })
    };
    let (status, first) = app.send(json_req(Method::POST, "/api/enquiries", enquiry("first"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["message"], "Enquiry added successfully");

    let (status, second) = app.send(json_req(Method::POST, "/api/enquiries", enquiry("second"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["enquiry"]["id"], first["enquiry"]["id"]);

    let (_, all) = app.send(get("/api/enquiries")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["message"], "second");

    let (status, _) = app
        .send(json_req(Method::POST, "/api/enquiries", json!({ "name": "Jane", "email": "jane@example.com" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn enquiry_email_is_not_format_checked() {
    let app = app().await;
    let body = json!({
        "name": "Jane", "email": "jane@localhost", "mobile": "5550100",
        "subject": "Quote", "address": "1 Main St", "message": "hello"
    });
    let (status, saved) = app.send(json_req(Method::POST, "/api/enquiries", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["enquiry"]["email"], "jane@localhost");
}

#[tokio::test]
async fn repeat_visit_updates_single_record() {
    let app = app().await;
    let visit = |city: &str| json!({ "ipAddress": "203.0.113.7", "city": city, "region": "MH", "country": "IN" });
    let (status, first) = app.send(json_req(Method::POST, "/api/visitors", visit("Pune"))).await;
    assert_eq!(status, StatusCode::CREATED);
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let (_, second) = app.send(json_req(Method::POST, "/api/visitors", visit("Mumbai"))).await;
    assert_eq!(second["id"], first["id"]);

    let parse = |v: &Value| chrono::DateTime::parse_from_rfc3339(v["visitTime"].as_str().unwrap()).unwrap();
    assert!(parse(&second) > parse(&first));

    let (_, all) = app.send(get("/api/visitors")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["city"], "Mumbai");
}

#[tokio::test]
async fn visitor_address_falls_back_to_forwarded_header() {
    let app = app().await;
    let mut req = json_req(Method::POST, "/api/visitors", json!({ "city": "Pune", "region": "MH", "country": "IN" }));
    req.headers_mut().insert("x-forwarded-for", "198.51.100.4, 10.0.0.1".parse().unwrap());
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ipAddress"], "198.51.100.4");

    // no body address, no header, no socket info
    let (status, _) = app
        .send(json_req(Method::POST, "/api/visitors", json!({ "city": "Pune", "region": "MH", "country": "IN" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn visitor_bulk_delete_reads_ids_from_query() {
    let app = app().await;
    let mut ids = Vec::new();
    for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.3"] {
        let (_, v) = app
            .send(json_req(Method::POST, "/api/visitors", json!({ "ipAddress": ip, "city": "c", "region": "r", "country": "n" })))
            .await;
        ids.push(v["id"].as_str().unwrap().to_string());
    }

    let del = |uri: String| Request::builder().method(Method::DELETE).uri(uri).body(Body::empty()).unwrap();
    let (status, _) = app.send(del("/api/visitors".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app.send(del("/api/visitors?ids=garbage".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.send(del(format!("/api/visitors?ids={}&ids%5B%5D={}", ids[0], ids[1]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 2);
    let (_, all) = app.send(get("/api/visitors")).await;
    assert_eq!(all[0]["id"], ids[2].as_str());
}

#[tokio::test]
async fn services_second_page_of_twelve() {
    let app = app().await;
    for i in 0..12 {
        let (status, _) = app
            .send(json_req(Method::POST, "/api/services", json!({ "title": format!("Service {i}"), "description": "d" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = app.send(get("/api/services?page=2&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"].as_array().unwrap().len(), 5);
    assert_eq!(body["services"][0]["title"], "Service 5");
    assert_eq!(body["totalCount"], 12);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 3);

    let (status, _) = app.send(get("/api/services?page=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn services_page_far_past_the_end_is_empty() {
    let app = app().await;
    app.send(json_req(Method::POST, "/api/services", json!({ "title": "t", "description": "d" }))).await;
    let (status, body) = app.send(get("/api/services?page=18446744073709551615&limit=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"], json!([]));
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn services_page_size_follows_the_caller() {
    let app = app().await;
    for i in 0..105 {
        app.send(json_req(Method::POST, "/api/services", json!({ "title": format!("s{i}"), "description": "d" }))).await;
    }
    let (status, body) = app.send(get("/api/services?page=1&limit=200")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"].as_array().unwrap().len(), 105);
    assert_eq!(body["limit"], 200);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn advertisement_get_update_and_delete_by_id() {
    let app = app().await;
    let (status, created) = app
        .send(multipart_req(
            Method::POST,
            "/api/advertisements",
            &[("title", "Spring sale"), ("description", "Half off")],
            png_part(PNG),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = app.send(get(&format!("/api/advertisements/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let mut gif = b"GIF89a".to_vec();
    gif.extend_from_slice(&[1, 0, 1, 0, 0, 0, 0, b';']);
    let gif_part = FilePart { file_name: "new.gif", content_type: "image/gif", bytes: &gif };
    let (status, updated) = app
        .send(multipart_req(Method::PUT, &format!("/api/advertisements/{id}"), &[("title", "Summer sale")], Some(gif_part)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Summer sale");
    assert_eq!(updated["description"], "Half off");
    assert!(updated["image"].as_str().unwrap().ends_with(".gif"));
    assert_ne!(updated["image"], created["image"]);

    let (status, body) = app
        .send(json_req(Method::PUT, &format!("/api/advertisements/{id}"), json!({ "title": "  " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "title is required");

    let missing = Uuid::new_v4();
    let (status, body) = app.send(get(&format!("/api/advertisements/{missing}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Advertisement not found");

    let del = |uri: String| Request::builder().method(Method::DELETE).uri(uri).body(Body::empty()).unwrap();
    let (status, body) = app.send(del(format!("/api/advertisements/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
    let (status, _) = app.send(del(format!("/api/advertisements/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.send(get("/api/advertisements")).await.1, json!([]));
}

#[tokio::test]
async fn service_update_get_and_delete() {
    let app = app().await;
    let (_, created) = app
        .send(json_req(Method::POST, "/api/services", json!({ "title": "Plumbing", "description": "Pipes" })))
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = app
        .send(multipart_req(Method::PUT, &format!("/api/services/{id}"), &[("description", "Pipes and drains")], png_part(PNG)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Plumbing");
    assert_eq!(updated["description"], "Pipes and drains");
    assert!(updated["image"].as_str().unwrap().starts_with("http://admin.test/uploads/"));

    let (status, fetched) = app.send(get(&format!("/api/services/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let missing = Uuid::new_v4();
    let (status, body) = app
        .send(json_req(Method::PUT, &format!("/api/services/{missing}"), json!({ "title": "x" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Service not found");

    let (status, body) = app.send(get("/api/services/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let del = Request::builder().method(Method::DELETE).uri(format!("/api/services/{id}")).body(Body::empty()).unwrap();
    let (status, body) = app.send(del).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
    let (status, _) = app.send(get(&format!("/api/services/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app().await;
    let (status, body) = app.send(get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/enquiries"].is_object());
}
