// src/gateway.rs
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::error;

use crate::attendance;
use crate::portal;
use crate::types::{AttendanceRequest, CookieRes, CredentialsReq, LoginRes, MarkAttendanceReq};

#[derive(Clone)]
pub struct Gateway {
    pub client: reqwest::Client,
    pub portal_base: String,
}

impl Gateway {
    pub fn new(portal_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            portal_base: portal_base.into(),
        }
    }
}

pub fn router(state: Gateway) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/get-cookie", post(get_cookie))
        .route("/mark-attendance", post(mark_attendance))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .layer(TraceLayer::new_for_http())
}

type ApiError = (StatusCode, Json<Value>);

// ---------- API HANDLERS ---------- //

async fn login(
    State(gw): State<Gateway>,
    Json(req): Json<CredentialsReq>,
) -> Result<Json<LoginRes>, ApiError> {
    let outcome = portal::login(&gw.client, &gw.portal_base, &req.email, &req.password)
        .await
        .map_err(login_failed)?;
    let Some(details) = portal::login_details(&outcome.body) else {
        return Err(bad("Invalid login response"));
    };
    let Some((name, stu_id)) = portal::name_and_stu_id(details) else {
        return Err(bad("Could not extract name or StuID"));
    };
    Ok(Json(LoginRes { name, stu_id }))
}

async fn get_cookie(
    State(gw): State<Gateway>,
    Json(req): Json<CredentialsReq>,
) -> Result<Json<CookieRes>, ApiError> {
    let outcome = portal::login(&gw.client, &gw.portal_base, &req.email, &req.password)
        .await
        .map_err(login_failed)?;
    let cookie = extract_cookie(&outcome)?;
    Ok(Json(CookieRes { cookie }))
}

// The portal not setting any cookie and setting cookies without a
// connect.sid entry are reported as distinct failures.
fn extract_cookie(outcome: &portal::LoginOutcome) -> Result<String, ApiError> {
    if outcome.set_cookie.is_empty() {
        return Err(bad("No session cookie received"));
    }
    outcome
        .session_cookie()
        .ok_or_else(|| bad("No connect.sid cookie found"))
}

async fn mark_attendance(
    State(gw): State<Gateway>,
    Json(req): Json<MarkAttendanceReq>,
) -> Result<Json<Value>, ApiError> {
    let payload = AttendanceRequest {
        attendance_id: req.attendance_id,
        stu_id: req.stu_id,
        off_qr_enabled: true,
    };
    // Relay the portal's parsed JSON verbatim; a non-JSON body fails the
    // relay like any transport error.
    let relayed: Value = attendance::record(&gw.client, &gw.portal_base, &req.cookie, &payload)
        .await
        .and_then(|body| Ok(serde_json::from_str(&body)?))
        .map_err(|e| fail("Attendance marking failed", e))?;
    Ok(Json(relayed))
}

fn bad(msg: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({"error": msg})))
}

fn login_failed<E: std::fmt::Display>(e: E) -> ApiError {
    error!("portal login failed: {e}");
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Login failed", "details": e.to_string()})),
    )
}

fn fail<E: std::fmt::Display>(msg: &str, e: E) -> ApiError {
    error!("{msg}: {e}");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": msg, "details": e.to_string()})),
    )
}
