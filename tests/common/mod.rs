#![allow(dead_code)]

use axum::http::{StatusCode, header};
use axum_test::{TestResponse, TestServer};
use hexlink::application::services::LinkStore;
use hexlink::routes::{RouterOptions, app_router};
use hexlink::utils::code_generator::RandomHexGenerator;
use hexlink::utils::url_validator::ValidationMode;
use std::sync::Arc;

pub const TARGET_URL: &str = "http://example.com";

pub fn create_test_store() -> Arc<LinkStore> {
    Arc::new(LinkStore::default())
}

pub fn create_test_server(store: Arc<LinkStore>) -> TestServer {
    create_test_server_with(store, RouterOptions::default())
}

pub fn create_test_server_with(store: Arc<LinkStore>, options: RouterOptions) -> TestServer {
    TestServer::new(app_router(store, options)).unwrap()
}

pub fn create_strict_test_store() -> Arc<LinkStore> {
    Arc::new(LinkStore::new(
        Box::new(RandomHexGenerator::default()),
        ValidationMode::Strict.validator(),
    ))
}

pub fn assert_json_content_type(response: &TestResponse) {
    assert_eq!(response.header(header::CONTENT_TYPE), "application/json");
}

/// Asserts the status, the content type and the `{"error": ...}` body shape.
pub fn assert_error(response: &TestResponse, status: StatusCode) -> String {
    response.assert_status(status);
    assert_json_content_type(response);

    let json = response.json::<serde_json::Value>();
    json["error"]
        .as_str()
        .expect("error body must contain an 'error' string")
        .to_string()
}
