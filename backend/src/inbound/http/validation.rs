//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure is an `invalid_request` error whose `details`
//! name the offending field and a stable code.

use serde_json::json;

use crate::domain::{
    ContentKey, ContentKeyError, Error, GameId, GameIdError, GameValidationError, ImageFormatError,
    LoginValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    UnsupportedImageType,
    FileTooLarge,
    EmptyFile,
    FieldTooLarge,
    InvalidEncoding,
    DuplicateField,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::UnsupportedImageType => "unsupported_image_type",
            ErrorCode::FileTooLarge => "file_too_large",
            ErrorCode::EmptyFile => "empty_file",
            ErrorCode::FieldTooLarge => "field_too_large",
            ErrorCode::InvalidEncoding => "invalid_encoding",
            ErrorCode::DuplicateField => "duplicate_field",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

pub(crate) fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_field(field, code.as_str(), message)
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("{field} must not be empty"),
    )
}

/// Parse a path id into a [`GameId`].
pub(crate) fn parse_game_id(raw: &str) -> Result<GameId, Error> {
    raw.parse::<GameId>().map_err(|err: GameIdError| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "value": raw,
            "code": ErrorCode::InvalidId.as_str(),
        }))
    })
}

pub(crate) fn parse_content_key(raw: &str) -> Result<ContentKey, Error> {
    ContentKey::new(raw).map_err(|err: ContentKeyError| {
        field_error("key", ErrorCode::MissingField, err.to_string())
    })
}

pub(crate) fn map_game_validation_error(err: GameValidationError) -> Error {
    match err {
        GameValidationError::MissingField { field } => missing_field_error(field.as_str()),
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => missing_field_error("username"),
        LoginValidationError::EmptyPassword => missing_field_error("password"),
    }
}

pub(crate) fn unsupported_image_error(err: ImageFormatError) -> Error {
    field_error("image", ErrorCode::UnsupportedImageType, err.to_string())
}

pub(crate) fn file_too_large_error(limit: usize) -> Error {
    Error::invalid_request(format!("image exceeds the {limit} byte upload limit")).with_details(
        json!({
            "field": "image",
            "code": ErrorCode::FileTooLarge.as_str(),
            "limit": limit,
        }),
    )
}

/// A file part that names a file but carries no bytes.
pub(crate) fn empty_file_error(filename: &str) -> Error {
    field_error(
        "image",
        ErrorCode::EmptyFile,
        format!("uploaded file `{filename}` is empty"),
    )
}
