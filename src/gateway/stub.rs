//! HTTP stub of the dog service, serving an [`InMemoryDogService`].
//!
//! Requires the `stub` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /auth/login`: body `{ "name", "email" }`; sets the session cookie.
//! - `POST /auth/logout`: drops the session.
//! - `GET /dogs/breeds`, `GET /dogs/search`, `POST /dogs`, `POST /dogs/match`: need the
//!   session cookie, otherwise `401`.
//!
//! ## Example
//!
//! ```ignore
//! use dogmatch::gateway::{stub, InMemoryDogService};
//!
//! let service = InMemoryDogService::new(dogs);
//! stub::serve(service, "127.0.0.1:3000").await?;
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{GatewayError, InMemoryDogService};
use crate::search::SearchParams;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "fetch-access-token";

struct StubState {
    service: InMemoryDogService,
    sessions: Mutex<HashSet<String>>,
    next_session: AtomicU64,
}

impl StubState {
    fn authorized(&self, headers: &HeaderMap) -> bool {
        let Some(token) = session_token(headers) else {
            return false;
        };
        self.sessions
            .lock()
            .map(|sessions| sessions.contains(&token))
            .unwrap_or(false)
    }
}

#[derive(Deserialize)]
struct LoginBody {
    name: String,
    #[allow(dead_code)]
    email: String,
}

/// Build an axum `Router` serving `service` with the remote service's routes.
pub fn router(service: InMemoryDogService) -> Router {
    let state = Arc::new(StubState {
        service,
        sessions: Mutex::new(HashSet::new()),
        next_session: AtomicU64::new(1),
    });
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/dogs/breeds", get(breeds_handler))
        .route("/dogs/search", get(search_handler))
        .route("/dogs", post(dogs_handler))
        .route("/dogs/match", post(match_handler))
        .with_state(state)
}

/// Serve the stub at the given address (e.g. `"127.0.0.1:3000"`).
pub async fn serve(service: InMemoryDogService, addr: &str) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Pull the session token out of the `Cookie` header.
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
}

fn error_response(err: GatewayError) -> Response {
    let status = err
        .status()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}

async fn login_handler(
    State(state): State<Arc<StubState>>,
    Json(body): Json<LoginBody>,
) -> Response {
    let token = format!("session-{}", state.next_session.fetch_add(1, Ordering::SeqCst));
    match state.sessions.lock() {
        Ok(mut sessions) => {
            sessions.insert(token.clone());
        }
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
    debug!(name = %body.name, "stub login");
    let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token);
    (StatusCode::OK, [(header::SET_COOKIE, cookie)], "OK").into_response()
}

async fn logout_handler(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if let (Some(token), Ok(mut sessions)) = (session_token(&headers), state.sessions.lock()) {
        sessions.remove(&token);
    }
    let cookie = format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE);
    (StatusCode::OK, [(header::SET_COOKIE, cookie)], "OK").into_response()
}

async fn breeds_handler(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(state.service.breeds_now()).into_response()
}

async fn search_handler(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let params = match SearchParams::from_query(pairs) {
        Ok(params) => params,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
                .into_response()
        }
    };
    match state.service.search_now(&params) {
        Ok(results) => Json(results).into_response(),
        Err(e) => error_response(e),
    }
}

async fn dogs_handler(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(ids): Json<Vec<String>>,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    match state.service.dogs_now(&ids) {
        Ok(dogs) => Json(dogs).into_response(),
        Err(e) => error_response(e),
    }
}

async fn match_handler(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(ids): Json<Vec<String>>,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    match state.service.match_now(&ids) {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(e),
    }
}
