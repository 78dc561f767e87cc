// src/qr.rs
use std::time::Duration;

use anyhow::{bail, Result};
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD as B64, Engine};
use image::GrayImage;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::error;

use crate::types::{DecodeRequest, DecodeResponse};

pub fn router() -> Router {
    Router::new()
        .route("/decode", post(decode))
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .layer(TraceLayer::new_for_http())
}

// ---------- API HANDLER ---------- //

async fn decode(
    Json(req): Json<DecodeRequest>,
) -> Result<Json<DecodeResponse>, (StatusCode, Json<Value>)> {
    match decode_image(&req.image_base64) {
        Ok(Some(text)) => Ok(Json(DecodeResponse { text })),
        Ok(None) => Err(not_found()),
        Err(e) => Err(internal(e)),
    }
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "No QR found"})))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Json<Value>) {
    error!("decode failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": e.to_string()})),
    )
}

// ---------- PIPELINE ---------- //

/// Full decode pipeline, short-circuiting on the first readable QR.
/// `Ok(None)` means the image decoded fine but holds no QR code; `Err` is
/// anything else (bad base64, corrupt image bytes).
pub fn decode_image(input: &str) -> Result<Option<String>> {
    let bytes = B64.decode(strip_data_url(input)?)?;
    let gray = image::load_from_memory(&bytes)?.to_luma8();
    if let Some(text) = detect(gray.clone()) {
        return Ok(Some(text));
    }
    // Low-contrast captures often only read after equalization.
    Ok(detect(imageproc::contrast::equalize_histogram(&gray)))
}

// data:[<mediatype>][;base64],<data>
fn strip_data_url(s: &str) -> Result<&str> {
    match s.strip_prefix("data:") {
        Some(rest) => match rest.find(',') {
            Some(comma) => Ok(&rest[comma + 1..]),
            None => bail!("Invalid data URL"),
        },
        None => Ok(s),
    }
}

fn detect(gray: GrayImage) -> Option<String> {
    let mut prepared = rqrr::PreparedImage::prepare(gray);
    prepared
        .detect_grids()
        .iter()
        .filter_map(|grid| grid.decode().ok())
        .map(|(_, content)| content)
        .find(|text| !text.is_empty())
}
