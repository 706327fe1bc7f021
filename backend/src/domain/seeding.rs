//! Startup seeding of default catalog data.
//!
//! Each table is seeded only while it is empty, so restarts never duplicate or
//! overwrite data edited through the API.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    AdminRepository, AdminRepositoryError, GameRepository, GameRepositoryError,
    PasswordHashError, PasswordHasher, SiteContentRepository, SiteContentRepositoryError,
};
use crate::domain::{
    BUNDLED_ASSET_PREFIX, ContentKey, ContentKeyError, GameFields, GameValidationError,
    SiteContentEntry,
};

/// Failures raised while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Games(#[from] GameRepositoryError),
    #[error(transparent)]
    SiteContent(#[from] SiteContentRepositoryError),
    #[error(transparent)]
    Admins(#[from] AdminRepositoryError),
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
    #[error("invalid default game: {0}")]
    InvalidGame(#[from] GameValidationError),
    #[error("invalid default content key: {0}")]
    InvalidContentKey(#[from] ContentKeyError),
}

/// Credentials for the account created when no admin exists.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: Zeroizing<String>,
}

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub games: usize,
    pub content_entries: usize,
    pub admin_created: bool,
}

struct DefaultGame {
    title: &'static str,
    genre: &'static str,
    description: &'static str,
    asset: &'static str,
    category: &'static str,
    cta_text: &'static str,
}

const DEFAULT_GAMES: [DefaultGame; 4] = [
    DefaultGame {
        title: "Cyberpunk 2077",
        genre: "RPG / FPS",
        description: "Unlock exclusive gear and premium content now! Requires quick human verification.",
        asset: "featured-game-1.jpg",
        category: "New Release",
        cta_text: "VIEW OFFER",
    },
    DefaultGame {
        title: "FC 24 (FIFA)",
        genre: "Sports / Simulation",
        description: "Get free Ultimate Team coins and early access to season passes!",
        asset: "featured-game-2.jpg",
        category: "Exclusive",
        cta_text: "CLAIM REWARD",
    },
    DefaultGame {
        title: "Assassin's Creed",
        genre: "Action / Adventure",
        description: "Free download for the latest DLC and 100% completion saves.",
        asset: "featured-game-3.jpg",
        category: "Limited Time",
        cta_text: "DOWNLOAD",
    },
    DefaultGame {
        title: "Call of Duty",
        genre: "Action / Adventure",
        description: "Experience intense warfare with the latest weapons and maps.",
        asset: "featured-game-4.jpg",
        category: "Featured",
        cta_text: "DOWNLOAD",
    },
];

const DEFAULT_CONTENT: [(&str, &str); 5] = [
    ("hero_title", "Create Manage Matches"),
    ("hero_subtitle", "World Gaming"),
    (
        "hero_description",
        "Find technology or people for digital projects in public sector and Find an individual specialist develope researcher.",
    ),
    ("countdown_days", "10"),
    ("site_title", "Gamics - Create Manage Matches"),
];

/// Default site content entries.
pub fn default_site_content() -> Result<Vec<SiteContentEntry>, ContentKeyError> {
    DEFAULT_CONTENT
        .iter()
        .map(|(key, value)| Ok(SiteContentEntry::text(ContentKey::new(key)?, *value)))
        .collect()
}

/// Seeds empty tables with the default catalog.
pub struct CatalogSeeder<G, S, A> {
    games: Arc<G>,
    content: Arc<S>,
    admins: Arc<A>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl<G, S, A> CatalogSeeder<G, S, A>
where
    G: GameRepository,
    S: SiteContentRepository,
    A: AdminRepository,
{
    pub fn new(
        games: Arc<G>,
        content: Arc<S>,
        admins: Arc<A>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            games,
            content,
            admins,
            hasher,
            clock,
        }
    }

    /// Seed every empty table. `admin` is only consulted when no account
    /// exists yet.
    pub async fn seed(&self, admin: Option<&BootstrapAdmin>) -> Result<SeedReport, SeedError> {
        let report = SeedReport {
            games: self.seed_games().await?,
            content_entries: self.seed_content().await?,
            admin_created: self.seed_admin(admin).await?,
        };
        info!(
            games = report.games,
            content_entries = report.content_entries,
            admin_created = report.admin_created,
            "seeding finished"
        );
        Ok(report)
    }

    async fn seed_games(&self) -> Result<usize, SeedError> {
        if self.games.count().await? > 0 {
            return Ok(0);
        }
        for game in &DEFAULT_GAMES {
            let fields = GameFields::new(
                game.title,
                game.genre,
                game.description,
                game.category,
                game.cta_text,
            )?;
            let image = format!("{BUNDLED_ASSET_PREFIX}{}", game.asset);
            self.games.create(&fields, &image, self.clock.utc()).await?;
        }
        Ok(DEFAULT_GAMES.len())
    }

    async fn seed_content(&self) -> Result<usize, SeedError> {
        if self.content.count().await? > 0 {
            return Ok(0);
        }
        let entries = default_site_content()?;
        self.content
            .insert_missing(&entries, self.clock.utc())
            .await?;
        Ok(entries.len())
    }

    async fn seed_admin(&self, admin: Option<&BootstrapAdmin>) -> Result<bool, SeedError> {
        let Some(admin) = admin else {
            return Ok(false);
        };
        if self.admins.count().await? > 0 {
            return Ok(false);
        }
        let hash = self.hasher.hash(&admin.password)?;
        let id = self
            .admins
            .upsert(&admin.username, &hash, self.clock.utc())
            .await?;
        info!(admin_id = %id, username = %admin.username, "bootstrap admin created");
        Ok(true)
    }
}
