//! Check routes — submission, history, and session clearing.
//!
//! Session identity rides in the `sessionId` cookie. Submissions are
//! form-urlencoded with stringly `xVal`/`yVal`/`rVal` fields; numbers are
//! parsed here so malformed input is a 400, not a rejection deeper in the
//! stack.

use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use points::{Coordinates, PointCheck};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::{check, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "sessionId";
const CLIENT_ID_HEADER: &str = "x-client-id";

#[derive(Deserialize)]
pub struct CheckForm {
    #[serde(rename = "xVal")]
    pub x_val: String,
    #[serde(rename = "yVal")]
    pub y_val: String,
    #[serde(rename = "rVal")]
    pub r_val: String,
}

#[derive(Serialize)]
pub struct ResultsResponse {
    pub results: Vec<PointCheck>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/check` — validate, evaluate, and record one submission.
///
/// Responds with the full session history (newest first) and sets the
/// session cookie, minting a new session when the request carried none.
pub async fn submit_check(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<CheckForm>,
) -> Response {
    let Ok(coords) = parse_coordinates(&form) else {
        return error_response(StatusCode::BAD_REQUEST, "invalid number format");
    };

    let session_id = session_id_from_jar(&jar).unwrap_or_else(session::generate_session_id);
    let owner = client_owner_id(&headers);

    if let Err(e) = state.rate_limiter.check_and_record(&session_id) {
        return error_response(StatusCode::TOO_MANY_REQUESTS, e.to_string());
    }

    if let Err(e) = state.leases.acquire(&session_id, owner) {
        return error_response(StatusCode::CONFLICT, e.to_string());
    }
    let outcome = check::run_check(&state, &session_id, coords).await;
    state.leases.release(&session_id, owner);

    match outcome {
        Ok(_) => {
            let results = session::results_newest_first(&state, &session_id).await;
            let jar = jar.add(session_cookie(&session_id));
            (jar, Json(ResultsResponse { results })).into_response()
        }
        Err(e) => check_error_to_response(&e),
    }
}

/// `GET /api/results` — history for the cookie's session, newest first.
pub async fn list_results(State(state): State<AppState>, jar: CookieJar) -> Json<ResultsResponse> {
    let results = match session_id_from_jar(&jar) {
        Some(session_id) => session::results_newest_first(&state, &session_id).await,
        None => Vec::new(),
    };
    Json(ResultsResponse { results })
}

/// `DELETE /api/session` — drop the session history and expire the cookie.
pub async fn clear_session(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(session_id) = session_id_from_jar(&jar) else {
        return error_response(StatusCode::BAD_REQUEST, "missing session cookie");
    };

    if session::clear_session(&state, &session_id).await {
        let jar = jar.add(expired_session_cookie());
        (jar, Json(serde_json::json!({ "status": "success", "message": "session cleared" })))
            .into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, "session not found")
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn parse_coordinates(form: &CheckForm) -> Result<Coordinates, std::num::ParseFloatError> {
    Ok(Coordinates::new(
        form.x_val.trim().parse()?,
        form.y_val.trim().parse()?,
        form.r_val.trim().parse()?,
    ))
}

fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .map(str::trim)
        .filter(|id| session::is_valid_session_id(id))
        .map(str::to_owned)
}

/// Lease owner for this request: the client's stable id when it sends
/// one, otherwise an ephemeral id (each anonymous request is its own
/// owner, so the lease still serializes them).
fn client_owner_id(headers: &HeaderMap) -> Uuid {
    headers
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, session_id.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .build()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

fn check_error_to_response(err: &check::CheckError) -> Response {
    match err {
        check::CheckError::Validation(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        check::CheckError::Timestamp(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

#[cfg(test)]
#[path = "checks_test.rs"]
mod tests;
