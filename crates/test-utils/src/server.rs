//! In-process mock of the platform API.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use septon_telemetry::interfaces::platform::PlatformConfig;
use septon_telemetry::interfaces::queries::QueryRequest;
use septon_telemetry::interfaces::users::{Researcher, ResearcherRecord};
use septon_telemetry::{QueryKind, session};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::token;

/// The password the mock accepts for any username.
pub const PASSWORD: &str = "Str0ng!pass";

type Shared = Arc<Mutex<AppState>>;

#[derive(Default)]
struct AppState {
    researchers: Vec<ResearcherRecord>,
    config: BTreeMap<String, String>,
    next_id: usize,
}

/// A mock platform API bound to an ephemeral localhost port.
pub struct MockApi {
    addr: SocketAddr,
}

impl MockApi {
    /// Bind the mock to an ephemeral port and serve it on a background task
    /// for the remainder of the test.
    ///
    /// # Errors
    ///
    /// Fails when the listener cannot be bound.
    pub async fn spawn() -> Result<Self> {
        let state = Shared::default();

        let router = Router::new()
            .route("/api/users/login", post(login))
            .route("/api/users/change_password", put(change_password))
            .route("/api/users/register", post(register))
            .route("/api/users/researchers", get(researchers))
            .route("/api/users/delete", delete(remove_researcher))
            .route("/api/platform/configs", get(configs).post(update_configs))
            .route("/api/queries", post(queries))
            .route("/api/queries/histogram", post(histogram))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("mock api stopped: {e}");
            }
        });

        Ok(Self { addr })
    }

    /// The base URL clients should be pointed at.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Reject requests without a fresh bearer token.
fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if session::is_expired(token) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login(Json(credentials): Json<Credentials>) -> Result<Json<Value>, StatusCode> {
    if credentials.username.is_empty() || credentials.password != PASSWORD {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "jwt": token::mint(3600),
        "token_type": "Bearer",
        "expires_in": 3600,
    })))
}

#[derive(Deserialize)]
struct PasswordChange {
    username: String,
    old_password: String,
    new_password: String,
}

async fn change_password(Json(change): Json<PasswordChange>) -> StatusCode {
    if change.username.is_empty()
        || change.old_password != PASSWORD
        || change.new_password.is_empty()
    {
        return StatusCode::FORBIDDEN;
    }
    StatusCode::OK
}

async fn register(
    State(state): State<Shared>, headers: HeaderMap, Json(researcher): Json<Researcher>,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;

    let mut state = state.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    state.next_id += 1;
    let user_id = format!("r-{}", state.next_id);
    state.researchers.push(ResearcherRecord { user_id, details: researcher });
    Ok(StatusCode::CREATED)
}

async fn researchers(
    State(state): State<Shared>, headers: HeaderMap,
) -> Result<Json<Vec<ResearcherRecord>>, StatusCode> {
    authorize(&headers)?;

    let state = state.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(state.researchers.clone()))
}

#[derive(Deserialize)]
struct DeleteParams {
    user_id: String,
}

async fn remove_researcher(
    State(state): State<Shared>, headers: HeaderMap, Query(params): Query<DeleteParams>,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;

    let mut state = state.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let before = state.researchers.len();
    state.researchers.retain(|record| record.user_id != params.user_id);
    if state.researchers.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::OK)
}

async fn configs(
    State(state): State<Shared>, headers: HeaderMap,
) -> Result<Json<PlatformConfig>, StatusCode> {
    authorize(&headers)?;

    let state = state.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(PlatformConfig {
        keys: vec!["encryption_scheme".to_string(), "sync_window_secs".to_string()],
        config: state.config.clone(),
    }))
}

async fn update_configs(
    State(state): State<Shared>, headers: HeaderMap,
    Json(updates): Json<BTreeMap<String, String>>,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;

    let mut state = state.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    state.config.extend(updates);
    Ok(StatusCode::OK)
}

/// Serves `COUNT` and `AVERAGE`. Deserializing into [`QueryRequest`] holds
/// the client to the wire format; the category filter must be last.
async fn queries(
    headers: HeaderMap, Json(request): Json<QueryRequest>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    check_category_last(&request)?;

    match request.query_kind {
        QueryKind::Count => Ok(Json(json!({"result": 42}))),
        QueryKind::Average => Ok(Json(json!({"averageResult": 12.5}))),
        QueryKind::GroupedCount => Err(StatusCode::BAD_REQUEST),
    }
}

/// Serves `GROUPED_COUNT`.
async fn histogram(
    headers: HeaderMap, Json(request): Json<QueryRequest>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    check_category_last(&request)?;

    if request.query_kind != QueryKind::GroupedCount {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({"groups": {"v1.0.0": 3, "v1.1.0": 5}})))
}

fn check_category_last(request: &QueryRequest) -> Result<(), StatusCode> {
    let is_category =
        request.filters.last().is_some_and(|filter| filter.field == "category");
    if is_category { Ok(()) } else { Err(StatusCode::BAD_REQUEST) }
}
