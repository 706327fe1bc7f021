//! In-memory adapters for the game store and the uploads directory.
//!
//! Both support failure injection so lifecycle tests can exercise the
//! compensation paths without a real database or filesystem.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{GameRepository, GameRepositoryError, UploadStore, UploadStoreError};
use crate::domain::{Game, GameFields, GameId, UploadedFileName};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("in-memory adapter mutex"),
    }
}

#[derive(Default)]
struct GameTable {
    next_id: i32,
    rows: BTreeMap<i32, Game>,
}

/// Game store backed by a map, with ids assigned from 1.
#[derive(Default)]
pub struct InMemoryGameRepository {
    table: Mutex<GameTable>,
    fail_writes: AtomicBool,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent create/update/delete fail with a query error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Insert a row directly, bypassing the service.
    pub fn insert(&self, fields: GameFields, image: &str, now: DateTime<Utc>) -> GameId {
        let mut table = lock(&self.table);
        table.next_id += 1;
        let id = match GameId::new(table.next_id) {
            Ok(id) => id,
            Err(err) => panic!("in-memory id overflow: {err}"),
        };
        table.rows.insert(
            id.get(),
            Game {
                id,
                fields,
                image: image.to_owned(),
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    /// Stored image value of a game, if it exists.
    pub fn image_of(&self, id: GameId) -> Option<String> {
        lock(&self.table)
            .rows
            .get(&id.get())
            .map(|game| game.image.clone())
    }

    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> Result<(), GameRepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GameRepositoryError::query("injected write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create(
        &self,
        fields: &GameFields,
        image: &str,
        now: DateTime<Utc>,
    ) -> Result<GameId, GameRepositoryError> {
        self.check_writable()?;
        Ok(self.insert(fields.clone(), image, now))
    }

    async fn update(
        &self,
        id: GameId,
        fields: &GameFields,
        image: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, GameRepositoryError> {
        self.check_writable()?;
        let mut table = lock(&self.table);
        let Some(game) = table.rows.get_mut(&id.get()) else {
            return Ok(false);
        };
        game.fields = fields.clone();
        game.image = image.to_owned();
        game.updated_at = now;
        Ok(true)
    }

    async fn delete(&self, id: GameId) -> Result<bool, GameRepositoryError> {
        self.check_writable()?;
        Ok(lock(&self.table).rows.remove(&id.get()).is_some())
    }

    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, GameRepositoryError> {
        Ok(lock(&self.table).rows.get(&id.get()).cloned())
    }

    async fn list(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games: Vec<Game> = lock(&self.table).rows.values().cloned().collect();
        games.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.get().cmp(&a.id.get()))
        });
        Ok(games)
    }

    async fn count(&self) -> Result<i64, GameRepositoryError> {
        Ok(lock(&self.table).rows.len() as i64)
    }

    async fn count_by_image(&self, image: &str) -> Result<i64, GameRepositoryError> {
        let table = lock(&self.table);
        Ok(table.rows.values().filter(|game| game.image == image).count() as i64)
    }
}

/// Uploads directory held in memory.
#[derive(Default)]
pub struct InMemoryUploadStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_removals: AtomicBool,
}

impl InMemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file directly, bypassing the service.
    pub fn put(&self, name: &str, bytes: &[u8]) {
        lock(&self.files).insert(name.to_owned(), bytes.to_vec());
    }

    pub fn contains(&self, name: &str) -> bool {
        lock(&self.files).contains_key(name)
    }

    /// Stored file names, sorted.
    pub fn names(&self) -> Vec<String> {
        lock(&self.files).keys().cloned().collect()
    }

    /// Make every subsequent removal fail.
    pub fn fail_removals(&self, fail: bool) {
        self.fail_removals.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UploadStore for InMemoryUploadStore {
    async fn exists(&self, name: &UploadedFileName) -> Result<bool, UploadStoreError> {
        Ok(self.contains(name.as_str()))
    }

    async fn write(&self, name: &UploadedFileName, bytes: Vec<u8>) -> Result<(), UploadStoreError> {
        let mut files = lock(&self.files);
        if files.contains_key(name.as_str()) {
            return Err(UploadStoreError::io(format!("`{name}` already exists")));
        }
        files.insert(name.as_str().to_owned(), bytes);
        Ok(())
    }

    async fn remove(&self, name: &UploadedFileName) -> Result<(), UploadStoreError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(UploadStoreError::io("injected removal failure"));
        }
        lock(&self.files).remove(name.as_str());
        Ok(())
    }
}
