use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::directory::repository::mock::MockAccountDirectory;
use service::directory::{Account, AccountDirectory, DirectoryError};
use service::store::repository::mock::MockServiceStore;
use tower::Service;
use uuid::Uuid;

use server::routes;
use server::state::AppState;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app(directory: Arc<dyn AccountDirectory>) -> Router {
    let state = AppState::new(directory, Arc::new(MockServiceStore::default()));
    routes::build_router(state, cors())
}

fn app_with(emails: &[&str]) -> Router {
    build_app(Arc::new(MockAccountDirectory::with_emails(emails)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = app_with(&[]);
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn blank_form_lists_fields_and_defaults() -> anyhow::Result<()> {
    let app = app_with(&[]);
    let (status, body) = send(&app, "GET", "/services/form", None).await?;
    assert_eq!(status, StatusCode::OK);
    let fields = body["fields"].as_array().expect("fields array");
    assert_eq!(fields.len(), 10);
    assert_eq!(fields[0]["name"], "name");
    assert_eq!(fields[0]["required"], true);
    assert_eq!(fields[9]["widget"], json!({"type": "textarea", "class": "font-mono", "rows": 5}));
    assert_eq!(body["initial"]["collaborators"], "");
    assert_eq!(body["initial"]["origins"], "*");
    Ok(())
}

#[tokio::test]
async fn create_edit_and_update_service() -> anyhow::Result<()> {
    let app = app_with(&["alice@test.com", "bob@test.com"]);

    let (status, created) = send(
        &app,
        "POST",
        "/services",
        Some(json!({
            "name": "Blog",
            "link": "https://blog.example.com",
            "respect_dnt": true,
            "collect_ips": false,
            "collaborators": "Alice@test.com,, bob@test.com",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Blog");
    assert_eq!(created["collect_ips"], false);
    assert_eq!(created["collaborators"][0]["email"], "alice@test.com");
    assert_eq!(created["collaborators"][1]["email"], "bob@test.com");
    let id = created["id"].as_str().expect("id").to_string();

    let (status, form) = send(&app, "GET", &format!("/services/{id}/form"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["initial"]["collaborators"], "alice@test.com, bob@test.com");
    assert_eq!(form["initial"]["respect_dnt"], "True");
    assert_eq!(form["initial"]["collect_ips"], "False");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/services/{id}"),
        Some(json!({"name": "Blog v2", "collaborators": "bob@test.com"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Blog v2");
    assert_eq!(updated["collaborators"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn unregistered_collaborator_is_a_field_error() -> anyhow::Result<()> {
    let app = app_with(&["alice@test.com"]);
    let (status, body) = send(
        &app,
        "POST",
        "/services",
        Some(json!({"name": "", "collaborators": "alice@test.com, ghost@test.com"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["collaborators"], json!(["Email 'ghost@test.com' is not registered"]));
    assert_eq!(body["errors"]["name"], json!(["This field is required."]));
    Ok(())
}

#[tokio::test]
async fn list_valued_field_is_rejected_before_lookup() -> anyhow::Result<()> {
    let app = app_with(&["a@x.com"]);
    let (status, body) = send(
        &app,
        "POST",
        "/services",
        Some(json!({"name": "Blog", "collaborators": ["a@x.com"]})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["collaborators"], json!(["Enter a single text, number or boolean value."]));
    Ok(())
}

#[tokio::test]
async fn unknown_service_is_not_found() -> anyhow::Result<()> {
    let app = app_with(&[]);
    let id = Uuid::new_v4();
    let (status, body) = send(&app, "GET", &format!("/services/{id}/form"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());

    let (status, _) = send(&app, "PUT", &format!("/services/{id}"), Some(json!({"name": "X"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

struct UnreachableDirectory;

#[async_trait]
impl AccountDirectory for UnreachableDirectory {
    async fn find_account_by_email(&self, _email: &str, _case_insensitive: bool) -> Result<Option<Account>, DirectoryError> {
        Err(DirectoryError::Repository("connection refused".into()))
    }
}

#[tokio::test]
async fn directory_outage_is_a_server_error() -> anyhow::Result<()> {
    let app = build_app(Arc::new(UnreachableDirectory));
    let (status, body) = send(&app, "POST", "/services", Some(json!({"name": "Blog", "collaborators": "a@x.com"}))).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains("connection refused"));

    // no collaborators, no lookup
    let (status, _) = send(&app, "POST", "/services", Some(json!({"name": "Blog"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}
