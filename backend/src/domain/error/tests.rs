//! Tests for domain error construction and trace capture.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::not_found("game not found"), ErrorCode::NotFound)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::InvalidRequest, message);
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async move { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[tokio::test]
async fn deserialising_does_not_adopt_ambient_trace(trace_id: TraceId) {
    let payload = json!({ "code": "invalid_request", "message": "bad" });
    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("payload is valid")
    })
    .await;
    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_with_snake_case_code_and_camel_case_fields() {
    let error = Error::invalid_request("title must not be empty")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "title", "code": "missing_field" }));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "title must not be empty",
            "traceId": TRACE_ID,
            "details": { "field": "title", "code": "missing_field" },
        })
    );
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let payload = json!({ "code": "not_found", "message": " " });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}

#[rstest]
fn invalid_field_names_field_and_code() {
    let error = Error::invalid_field("existing_image", "invalid_image_reference", "bad path");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.field(), Some("existing_image"));
    assert_eq!(error.detail_code(), Some("invalid_image_reference"));
    assert!(!error.is_internal());
}

#[rstest]
fn details_without_field_yield_none() {
    let error = Error::internal("boom").with_details(json!({ "retry": true }));
    assert_eq!(error.field(), None);
    assert!(error.is_internal());
}

#[rstest]
fn new_replaces_blank_messages_with_generic_wording() {
    assert_eq!(Error::not_found("  ").message(), "not found");
}
