use std::io::Cursor;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, GrayImage, Luma};
use qrcode::QrCode;
use serde_json::{json, Value};
use tower::ServiceExt;

fn png_base64(img: GrayImage) -> String {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, image::ImageOutputFormat::Png)
        .unwrap();
    STANDARD.encode(buf.into_inner())
}

fn qr_png_base64(text: &str) -> String {
    let img = QrCode::new(text.as_bytes())
        .unwrap()
        .render::<Luma<u8>>()
        .min_dimensions(240, 240)
        .build();
    png_base64(img)
}

async fn post_decode(image_base64: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/decode")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "imageBase64": image_base64 }).to_string(),
        ))
        .unwrap();
    let res = camu_tools::qr::router().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn decodes_a_data_url_qr() {
    let data_url = format!("data:image/png;base64,{}", qr_png_base64("HELLO"));
    let (status, body) = post_decode(&data_url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"text": "HELLO"}));
}

#[tokio::test]
async fn decodes_raw_base64_too() {
    let (status, body) = post_decode(&qr_png_base64("HELLO")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"text": "HELLO"}));
}

#[tokio::test]
async fn solid_image_is_404() {
    let blank = GrayImage::from_pixel(200, 200, Luma([255u8]));
    let (status, body) = post_decode(&png_base64(blank)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "No QR found"}));
}

#[tokio::test]
async fn invalid_base64_is_500() {
    let (status, body) = post_decode("this is not base64!!").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn decoding_is_idempotent() {
    let b64 = qr_png_base64("REPEATABLE");
    let (first_status, first_body) = post_decode(&b64).await;
    let (second_status, second_body) = post_decode(&b64).await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first_body, second_body);
}
