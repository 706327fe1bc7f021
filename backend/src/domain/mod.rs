//! Domain primitives, services and ports.
//!
//! Types here are transport agnostic: inbound adapters translate requests
//! into these types and outbound adapters implement the traits in [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: error payload shared by every adapter.
//! - [`Game`], [`GameFields`], [`GameId`]: catalog entries.
//! - [`ImageReference`] and [`resolve_image`]: the image lifecycle.
//! - [`CatalogService`], [`SiteContentService`], [`AdminLoginService`],
//!   [`CatalogSeeder`]: use-case implementations of the driving ports.

pub mod auth;
pub mod catalog_service;
pub mod error;
pub mod game;
pub mod image;
pub mod login_service;
pub mod ports;
pub mod seeding;
pub mod site_content;
pub mod site_content_service;
pub mod trace_id;

pub use self::auth::{
    AdminAccount, AdminId, AdminIdentity, LoginCredentials, LoginValidationError,
};
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::game::{
    Game, GameField, GameFields, GameFieldsDraft, GameId, GameIdError, GameValidationError,
};
pub use self::image::{
    BUNDLED_ASSET_PREFIX, CandidateImage, DeclaredImage, ImageFormat, ImageFormatError,
    ImageReference, ImageReferenceError, ImageRejection, ImageResolutionError, ImageUpload,
    RandomSuffix, ResolvedImage, SUFFIX_RANGE, UPLOADS_PREFIX, UploadNameSuffix,
    UploadedFileName, WriteIntent, owned_upload, resolve_image, superseded_upload,
};
pub use self::login_service::AdminLoginService;
pub use self::seeding::{BootstrapAdmin, CatalogSeeder, SeedError, SeedReport};
pub use self::site_content::{
    ContentKey, ContentKeyError, DEFAULT_CONTENT_TYPE, SiteContentEntry,
};
pub use self::site_content_service::SiteContentService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
