#![cfg(test)]
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::errors::ServiceError;
use crate::product::Product;
use crate::storage::{JsonFileStore, ProductStore};

/// A data file inside its own temp directory, removed on drop.
pub struct TempDataFile {
    dir: PathBuf,
    path: PathBuf,
}

impl TempDataFile {
    /// Directory exists, file does not.
    pub fn absent() -> Self {
        let dir = std::env::temp_dir().join(format!("products_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("products.json");
        Self { dir, path }
    }

    pub async fn with_raw(body: &str) -> Result<Self, anyhow::Error> {
        let tmp = Self::absent();
        tokio::fs::write(&tmp.path, body).await?;
        Ok(tmp)
    }

    pub async fn with_json(value: serde_json::Value) -> Result<Self, anyhow::Error> {
        Self::with_raw(&serde_json::to_string_pretty(&value)?).await
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn dir(&self) -> &Path { &self.dir }
}

impl Drop for TempDataFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// File store whose `load_all` waits until `parties` loads are in flight,
/// forcing overlapping read-modify-write cycles.
pub struct BarrierStore {
    inner: JsonFileStore,
    barrier: Arc<Barrier>,
}

impl BarrierStore {
    pub fn new(inner: JsonFileStore, parties: usize) -> Self {
        Self { inner, barrier: Arc::new(Barrier::new(parties)) }
    }
}

#[async_trait]
impl ProductStore for BarrierStore {
    async fn load_all(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self.inner.load_all().await?;
        self.barrier.wait().await;
        Ok(products)
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), ServiceError> {
        self.inner.save_all(products).await
    }
}
