//! Catalog entries ("games") and their validated text fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Store-assigned positive integer identifying a game.
///
/// # Examples
/// ```
/// use gamics::domain::GameId;
///
/// let id: GameId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("0".parse::<GameId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(i32);

/// Reasons a game identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameIdError {
    #[error("game id must be a number")]
    NotANumber,
    #[error("game id must be positive")]
    NotPositive,
}

impl GameId {
    /// Wrap a positive store identifier.
    pub fn new(value: i32) -> Result<Self, GameIdError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(GameIdError::NotPositive)
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for GameId {
    type Err = GameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i32 = s.trim().parse().map_err(|_| GameIdError::NotANumber)?;
        Self::new(value)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names of the required text fields, as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameField {
    Title,
    Genre,
    Description,
    Category,
    CtaText,
}

impl GameField {
    pub const ALL: [GameField; 5] = [
        GameField::Title,
        GameField::Genre,
        GameField::Description,
        GameField::Category,
        GameField::CtaText,
    ];

    /// Form/JSON field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Genre => "genre",
            Self::Description => "description",
            Self::Category => "category",
            Self::CtaText => "cta_text",
        }
    }

    /// Look up a field by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for GameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for game text fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameValidationError {
    #[error("{field} must not be empty")]
    MissingField { field: GameField },
}

/// Unvalidated text fields as collected from a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFieldsDraft {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cta_text: Option<String>,
}

impl GameFieldsDraft {
    /// Record a value for the named field.
    pub fn set(&mut self, field: GameField, value: String) {
        let slot = match field {
            GameField::Title => &mut self.title,
            GameField::Genre => &mut self.genre,
            GameField::Description => &mut self.description,
            GameField::Category => &mut self.category,
            GameField::CtaText => &mut self.cta_text,
        };
        *slot = Some(value);
    }
}

/// Validated text fields of a game.
///
/// ## Invariants
/// - Every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFields {
    title: String,
    genre: String,
    description: String,
    category: String,
    cta_text: String,
}

fn required(value: Option<String>, field: GameField) -> Result<String, GameValidationError> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GameValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

impl TryFrom<GameFieldsDraft> for GameFields {
    type Error = GameValidationError;

    fn try_from(draft: GameFieldsDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            title: required(draft.title, GameField::Title)?,
            genre: required(draft.genre, GameField::Genre)?,
            description: required(draft.description, GameField::Description)?,
            category: required(draft.category, GameField::Category)?,
            cta_text: required(draft.cta_text, GameField::CtaText)?,
        })
    }
}

impl GameFields {
    /// Build fields from plain strings, validating each one.
    ///
    /// # Examples
    /// ```
    /// use gamics::domain::GameFields;
    ///
    /// let fields = GameFields::new("Title", "RPG", "About", "New", "PLAY").unwrap();
    /// assert_eq!(fields.cta_text(), "PLAY");
    /// ```
    pub fn new(
        title: &str,
        genre: &str,
        description: &str,
        category: &str,
        cta_text: &str,
    ) -> Result<Self, GameValidationError> {
        Self::try_from(GameFieldsDraft {
            title: Some(title.to_owned()),
            genre: Some(genre.to_owned()),
            description: Some(description.to_owned()),
            category: Some(category.to_owned()),
            cta_text: Some(cta_text.to_owned()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn cta_text(&self) -> &str {
        &self.cta_text
    }
}

/// A persisted catalog entry.
///
/// `image` holds the stored reference string verbatim; it is classified with
/// [`crate::domain::ImageReference::parse`] whenever it matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub fields: GameFields,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
