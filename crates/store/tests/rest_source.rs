use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use directory_model::Company;
use directory_store::{
    CompanySource, DataOrigin, DirectoryStore, FallbackReason, RestSource, SortOrder,
    StoreConfig, StoreError,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const KEY: &str = "anon-key";

#[derive(Clone, Default)]
struct FakeBackend {
    rows: Arc<Mutex<Vec<Value>>>,
    last_order: Arc<Mutex<Option<String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    apikey == Some(KEY) && bearer == Some("Bearer anon-key")
}

async fn select(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    *backend.last_order.lock().unwrap() = params.get("order").cloned();
    let mut rows = backend.rows.lock().unwrap().clone();
    rows.sort_by(|a, b| a["nome"].as_str().cmp(&b["nome"].as_str()));
    Ok(Json(rows))
}

async fn insert(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Vec<Value>>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    if headers.get("prefer").and_then(|v| v.to_str().ok()) != Some("return=minimal") {
        return StatusCode::BAD_REQUEST;
    }
    let mut rows = backend.rows.lock().unwrap();
    for mut row in body {
        if row.get("id").is_some() {
            return StatusCode::BAD_REQUEST;
        }
        row["id"] = json!(rows.len() + 1);
        row["created_at"] = json!("2025-03-01T12:00:00+00:00");
        rows.push(row);
    }
    StatusCode::CREATED
}

async fn spawn_backend(backend: FakeBackend) -> String {
    let app = Router::new()
        .route("/rest/v1/aziende", get(select).post(insert))
        .with_state(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(url: &str, key: &str) -> StoreConfig {
    StoreConfig::new(Some(url), Some(key)).unwrap()
}

#[tokio::test]
async fn select_sends_credentials_and_order() {
    let backend = FakeBackend::default();
    backend.rows.lock().unwrap().push(json!({
        "id": 1,
        "nome": "Zeta",
        "settore": "SERVIZI E VARIE",
        "prodotti": null
    }));
    let url = spawn_backend(backend.clone()).await;

    let source = RestSource::new(&config(&url, KEY)).unwrap();
    let rows = source.select(SortOrder::NameAscending).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id.as_deref(), Some("1"));
    assert_eq!(rows[0].prodotti, None);
    assert_eq!(
        backend.last_order.lock().unwrap().as_deref(),
        Some("nome.asc")
    );
}

#[tokio::test]
async fn rejected_credentials_surface_status() {
    let url = spawn_backend(FakeBackend::default()).await;
    let source = RestSource::new(&config(&url, "wrong")).unwrap();

    let err = source.select(SortOrder::NewestFirst).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 401, .. }));
}

#[tokio::test]
async fn store_falls_back_when_credentials_are_rejected() {
    let url = spawn_backend(FakeBackend::default()).await;
    let store = DirectoryStore::from_config(Some(&config(&url, "wrong"))).unwrap();

    let snapshot = store.load().await;
    assert_eq!(snapshot.companies.len(), 14);
    assert!(matches!(
        snapshot.origin,
        DataOrigin::Fallback {
            reason: FallbackReason::QueryFailed(_)
        }
    ));
}

#[tokio::test]
async fn create_round_trips_through_the_backend() {
    let backend = FakeBackend::default();
    backend.rows.lock().unwrap().push(json!({ "id": 1, "nome": "Alfa" }));
    let url = spawn_backend(backend.clone()).await;
    let store = DirectoryStore::from_config(Some(&config(&url, KEY))).unwrap();
    assert!(store.load().await.origin.is_live());

    let submitted = Company::new("local", "Beta Srl", "Distributore", "SERVIZI E VARIE")
        .products(["Prodotto A", "Prodotto B"]);
    let created = store.create(submitted).await.unwrap();

    assert_eq!(created.id, "2");
    assert_eq!(created.products, vec!["Prodotto A", "Prodotto B"]);
    assert_eq!(
        created.created_at.as_deref(),
        Some("2025-03-01T12:00:00+00:00")
    );

    let names: Vec<_> = store.companies().await.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Alfa", "Beta Srl"]);
    assert_eq!(backend.rows.lock().unwrap()[1]["tipologia"], "Distributore");
}
