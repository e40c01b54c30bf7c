use crate::command::{CommandHandler, CommandRequest, CommandResponse};
use crate::server_security::ListenPlan;
use anyhow::Result;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Response as HttpResponse, StatusCode},
    response::Response,
    routing::{get, post},
    Router,
};
use directory_protocol::serialize_json;
use directory_store::DirectoryStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct HttpState {
    handler: Arc<CommandHandler>,
    store: DirectoryStore,
}

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<&'static str>,
    companies: usize,
}

pub(crate) fn router(store: DirectoryStore) -> Router {
    let state = HttpState {
        handler: Arc::new(CommandHandler::new(store.clone())),
        store,
    };
    Router::new()
        .route("/command", post(http_handler))
        .route("/health", get(http_health))
        .with_state(state)
}

pub(crate) async fn serve_http(bind: &str, public: bool, store: DirectoryStore) -> Result<()> {
    let plan = ListenPlan::resolve(bind, public).await?;

    // Warm the shared list so the first request does not pay for the load.
    let snapshot = store.load().await;
    log::info!(
        "Serving {} companies ({})",
        snapshot.companies.len(),
        snapshot.origin.as_str()
    );

    let listener = tokio::net::TcpListener::bind(plan.listen).await?;
    let local_addr = listener.local_addr()?;
    let base_url = format!("http://{local_addr}");

    crate::print_stdout(&format!("Serving Command API: {base_url}/command"))?;
    crate::print_stdout(&format!("Health endpoint: {base_url}/health"))?;
    if public {
        let addrs = plan
            .addrs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        crate::print_stdout(&format!(
            "Public bind enabled (--public). Resolved addresses: {addrs}"
        ))?;
    }
    crate::print_stdout(&format!(
        "Try: curl -X POST {base_url}/command -H 'Content-Type: application/json' -d '{{\"action\":\"list\"}}'"
    ))?;

    axum::serve(listener, router(store)).await?;
    Ok(())
}

async fn http_handler(State(state): State<HttpState>, body: Bytes) -> Result<Response, StatusCode> {
    let request: CommandRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            let response = CommandResponse::error(
                "invalid_request",
                format!("Invalid JSON request: {err}"),
                Some("Verify the request is valid JSON and matches the Command API schema.".to_string()),
            );
            return build_response(StatusCode::BAD_REQUEST, &response);
        }
    };
    let response = state.handler.execute(request).await;
    build_response(StatusCode::OK, &response)
}

async fn http_health(State(state): State<HttpState>) -> Result<Response, StatusCode> {
    let origin = state.store.origin().await;
    let report = HealthReport {
        status: "ok",
        configured: state.store.is_configured(),
        origin: origin.as_ref().map(|o| o.as_str()),
        companies: state.store.companies().await.len(),
    };
    build_response(StatusCode::OK, &report)
}

fn build_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, StatusCode> {
    let bytes = serialize_json(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_bytes();

    HttpResponse::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
