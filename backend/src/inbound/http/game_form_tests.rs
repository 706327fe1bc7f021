//! Tests for multipart game form intake.

use super::*;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_support::MultipartBody;

const SMALL_LIMITS: UploadLimits = UploadLimits {
    max_file_bytes: 8,
    max_text_bytes: 64,
};

async fn summarise(payload: Multipart, limits: web::Data<UploadLimits>) -> Result<HttpResponse, Error> {
    let form = GameForm::read(payload, **limits).await?;
    Ok(HttpResponse::Ok().json(json!({
        "title": form.fields.title(),
        "cta_text": form.fields.cta_text(),
        "existing_image": form.existing_image,
        "upload": form.upload.as_ref().map(|upload| json!({
            "extension": upload.declared().extension(),
            "len": upload.bytes().len(),
        })),
    })))
}

async fn submit(body: MultipartBody, limits: UploadLimits) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(limits))
            .route("/form", web::post().to(summarise)),
    )
    .await;
    let request = test::TestRequest::post()
        .uri("/form")
        .insert_header(("content-type", body.content_type()))
        .set_payload(body.finish())
        .to_request();
    let response = test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = serde_json::from_slice(&test::read_body(response).await).expect("json body");
    (status, body)
}

fn detail_code(body: &Value) -> Option<&str> {
    body.pointer("/details/code").and_then(Value::as_str)
}

#[actix_web::test]
async fn reads_fields_and_image() {
    let body = MultipartBody::game("  Call of Duty ")
        .text("game_id", "12")
        .file("image", "Cover.WEBP", "image/webp", b"webp");

    let (status, body) = submit(body, UploadLimits::default()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Call of Duty");
    assert_eq!(body["upload"], json!({ "extension": "webp", "len": 4 }));
    assert_eq!(body["existing_image"], Value::Null);
}

#[rstest]
#[case("", Value::Null)]
#[case("   ", Value::Null)]
#[case("./assets/images/featured-game-1.jpg", json!("./assets/images/featured-game-1.jpg"))]
#[case("  /uploads/123-a.png\n", json!("/uploads/123-a.png"))]
#[actix_web::test]
async fn existing_image_is_trimmed_and_blank_is_absent(#[case] raw: &str, #[case] expected: Value) {
    let body = MultipartBody::game("Title").text("existing_image", raw);
    let (status, body) = submit(body, UploadLimits::default()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["existing_image"], expected);
}

#[actix_web::test]
async fn empty_file_part_counts_as_no_upload() {
    let body = MultipartBody::game("Title").file("image", "", "application/octet-stream", b"");
    let (status, body) = submit(body, UploadLimits::default()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upload"], Value::Null);
}

#[actix_web::test]
async fn named_file_without_bytes_is_rejected() {
    let body = MultipartBody::game("Title").file("image", "cover.png", "image/png", b"");
    let (status, body) = submit(body, UploadLimits::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_code(&body), Some("empty_file"));
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("image")
    );
}

#[actix_web::test]
async fn defaults_fit_within_small_text_limits() {
    let (status, body) = submit(MultipartBody::game("Title"), SMALL_LIMITS).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Title");
}

#[rstest]
#[case("notes.txt", "text/plain")]
#[case("cover.png", "application/pdf")]
#[case("cover.svg", "image/png")]
#[case("", "image/png")]
#[actix_web::test]
async fn disallowed_images_are_rejected(#[case] filename: &str, #[case] media_type: &str) {
    let body = MultipartBody::game("Title").file("image", filename, media_type, b"data");
    let (status, body) = submit(body, UploadLimits::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_code(&body), Some("unsupported_image_type"));
}

#[actix_web::test]
async fn oversized_image_is_rejected() {
    let body = MultipartBody::game("Title").file("image", "big.png", "image/png", &[0_u8; 9]);
    let (status, body) = submit(body, SMALL_LIMITS).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_code(&body), Some("file_too_large"));
}

#[actix_web::test]
async fn image_at_the_limit_is_accepted() {
    let body = MultipartBody::game("Title").file("image", "edge.gif", "image/gif", &[0_u8; 8]);
    let (status, _) = submit(body, SMALL_LIMITS).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn oversized_text_field_is_rejected() {
    let body = MultipartBody::game("Title").text("description", &"x".repeat(65));
    let (status, body) = submit(body, SMALL_LIMITS).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_code(&body), Some("field_too_large"));
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("description")
    );
}

#[rstest]
#[case("title")]
#[case("cta_text")]
#[actix_web::test]
async fn missing_required_field_is_named(#[case] missing: &str) {
    let mut body = MultipartBody::new();
    for field in GameField::ALL {
        if field.as_str() != missing {
            body = body.text(field.as_str(), "value");
        }
    }
    let (status, body) = submit(body, UploadLimits::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_code(&body), Some("missing_field"));
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some(missing)
    );
}

#[actix_web::test]
async fn second_image_is_rejected() {
    let body = MultipartBody::game("Title")
        .file("image", "a.png", "image/png", b"a")
        .file("image", "b.png", "image/png", b"b");
    let (status, body) = submit(body, UploadLimits::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail_code(&body), Some("duplicate_field"));
}
