//! `multipart/form-data` intake for game create and update.
//!
//! The image part's declared media type and filename extension are checked
//! before any of its bytes are read, and the size cap is enforced while the
//! part streams in. Nothing reaches the upload store from here.

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::TryStreamExt;

use crate::domain::ports::{CreateGameRequest, UpdateGameRequest};
use crate::domain::{
    DeclaredImage, Error, GameField, GameFields, GameFieldsDraft, GameId, ImageFormatError,
    ImageUpload,
};
use crate::inbound::http::validation::{
    ErrorCode, empty_file_error, field_error, file_too_large_error, map_game_validation_error,
    unsupported_image_error,
};

/// Default cap on the image part.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Cap on every text part.
pub const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

const IMAGE_FIELD: &str = "image";
const EXISTING_IMAGE_FIELD: &str = "existing_image";

/// Size limits applied while reading a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_bytes: usize,
    pub max_text_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_text_bytes: MAX_TEXT_FIELD_BYTES,
        }
    }
}

impl UploadLimits {
    pub fn with_max_file_bytes(mut self, bytes: usize) -> Self {
        self.max_file_bytes = bytes;
        self
    }
}

/// A fully read and validated game form.
#[derive(Debug)]
pub struct GameForm {
    pub fields: GameFields,
    pub existing_image: Option<String>,
    pub upload: Option<ImageUpload>,
}

fn malformed_body(err: MultipartError) -> Error {
    field_error(
        "body",
        ErrorCode::MalformedBody,
        format!("malformed multipart body: {err}"),
    )
}

async fn read_capped(
    field: &mut Field,
    limit: usize,
    too_large: impl Fn() -> Error,
) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed_body)? {
        if buf.len() + chunk.len() > limit {
            return Err(too_large());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

async fn read_text(field: &mut Field, name: &str, limit: usize) -> Result<String, Error> {
    let bytes = read_capped(field, limit, || {
        field_error(
            name,
            ErrorCode::FieldTooLarge,
            format!("{name} exceeds {limit} bytes"),
        )
    })
    .await?;
    String::from_utf8(bytes).map_err(|_| {
        field_error(
            name,
            ErrorCode::InvalidEncoding,
            format!("{name} must be UTF-8 text"),
        )
    })
}

async fn discard(field: &mut Field) -> Result<(), Error> {
    while field.try_next().await.map_err(malformed_body)?.is_some() {}
    Ok(())
}

async fn read_image(field: &mut Field, limit: usize) -> Result<Option<ImageUpload>, Error> {
    let filename = field
        .content_disposition()
        .and_then(|disposition| disposition.get_filename())
        .unwrap_or_default()
        .to_owned();
    let media_type = field.content_type().map(|mime| mime.essence_str().to_owned());

    // Browsers send an empty, nameless part when no file was chosen.
    if filename.is_empty() {
        let bytes = read_capped(field, limit, || file_too_large_error(limit)).await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        return Err(unsupported_image_error(
            ImageFormatError::UnsupportedExtension { filename },
        ));
    }

    let declared =
        DeclaredImage::check(media_type.as_deref(), &filename).map_err(unsupported_image_error)?;
    let bytes = read_capped(field, limit, || file_too_large_error(limit)).await?;
    if bytes.is_empty() {
        return Err(empty_file_error(&filename));
    }
    Ok(Some(ImageUpload::new(declared, bytes)))
}

impl GameForm {
    /// Consume the whole multipart payload.
    ///
    /// Unknown parts are drained and ignored. `existing_image` is trimmed and
    /// counts as absent when blank.
    pub async fn read(mut payload: Multipart, limits: UploadLimits) -> Result<Self, Error> {
        let mut draft = GameFieldsDraft::default();
        let mut existing_image = None;
        let mut upload = None;
        let mut seen_image = false;

        while let Some(mut field) = payload.try_next().await.map_err(malformed_body)? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                IMAGE_FIELD => {
                    if seen_image {
                        return Err(field_error(
                            IMAGE_FIELD,
                            ErrorCode::DuplicateField,
                            "only one image may be uploaded",
                        ));
                    }
                    seen_image = true;
                    upload = read_image(&mut field, limits.max_file_bytes).await?;
                }
                EXISTING_IMAGE_FIELD => {
                    let value = read_text(&mut field, &name, limits.max_text_bytes).await?;
                    let value = value.trim();
                    existing_image = (!value.is_empty()).then(|| value.to_owned());
                }
                other => match GameField::from_name(other) {
                    Some(game_field) => {
                        let value = read_text(&mut field, &name, limits.max_text_bytes).await?;
                        draft.set(game_field, value);
                    }
                    None => discard(&mut field).await?,
                },
            }
        }

        let fields = GameFields::try_from(draft).map_err(map_game_validation_error)?;
        Ok(Self {
            fields,
            existing_image,
            upload,
        })
    }

    pub fn into_create_request(self) -> CreateGameRequest {
        CreateGameRequest {
            fields: self.fields,
            existing_image: self.existing_image,
            upload: self.upload,
        }
    }

    pub fn into_update_request(self, id: GameId) -> UpdateGameRequest {
        UpdateGameRequest {
            id,
            fields: self.fields,
            existing_image: self.existing_image,
            upload: self.upload,
        }
    }
}

#[cfg(test)]
#[path = "game_form_tests.rs"]
mod tests;
