use std::sync::Arc;

use configs::{IdStrategy, StorageConfig, WriteMode};
use tokio::sync::Mutex;
use tracing::info;

use crate::collection;
use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::product::{Patch, Product};
use crate::storage::{JsonFileStore, ProductStore};

/// Product operations over a whole-collection store.
///
/// Each call performs exactly one `load_all` and, for mutations that
/// change something, exactly one `save_all`. Under `WriteMode::Unguarded`
/// two overlapping mutations can each load the same snapshot and the
/// later save discards the earlier one's change. `WriteMode::Serialized`
/// holds a process-wide lock across every read-modify-write cycle.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    id_strategy: IdStrategy,
    write_lock: Option<Arc<Mutex<()>>>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store, id_strategy: IdStrategy::default(), write_lock: None }
    }

    /// File-backed service configured from the storage section.
    pub fn from_config(cfg: &StorageConfig) -> Self {
        Self::new(Arc::new(JsonFileStore::new(cfg.data_file.clone())))
            .with_id_strategy(cfg.id_strategy)
            .with_write_mode(cfg.write_mode)
    }

    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_lock = match mode {
            WriteMode::Unguarded => None,
            WriteMode::Serialized => Some(Arc::new(Mutex::new(()))),
        };
        self
    }

    /// Matching records for one page. An empty page is not an error.
    pub async fn list(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<Product>, ServiceError> {
        let products = self.store.load_all().await?;
        Ok(collection::query(products, search, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        let products = self.store.load_all().await?;
        Ok(collection::find_by_id(&products, id).cloned())
    }

    pub async fn create(&self, partial: Patch) -> Result<Product, ServiceError> {
        let _guard = self.lock().await;
        let products = self.store.load_all().await?;
        let (products, created) = collection::insert(products, partial, self.id_strategy)?;
        self.store.save_all(&products).await?;
        info!(id = created.id, "product created");
        Ok(created)
    }

    /// `None` when no record has `id`; nothing is written in that case.
    pub async fn update(&self, id: i64, patch: Patch) -> Result<Option<Product>, ServiceError> {
        let _guard = self.lock().await;
        let products = self.store.load_all().await?;
        let Some((products, updated)) = collection::update(products, id, patch) else {
            return Ok(None);
        };
        self.store.save_all(&products).await?;
        info!(id, "product updated");
        Ok(Some(updated))
    }

    /// `false` when no record has `id`; nothing is written in that case.
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let _guard = self.lock().await;
        let products = self.store.load_all().await?;
        let (products, removed) = collection::remove(products, id);
        if !removed {
            return Ok(false);
        }
        self.store.save_all(&products).await?;
        info!(id, "product deleted");
        Ok(true)
    }

    async fn lock(&self) -> Option<tokio::sync::OwnedMutexGuard<()>> {
        match &self.write_lock {
            Some(lock) => Some(Arc::clone(lock).lock_owned().await),
            None => None,
        }
    }
}
