use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::ProductStore;
use crate::errors::ServiceError;
use crate::product::Product;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// JSON file-backed product collection.
///
/// The file holds one pretty-printed JSON array. Nothing is cached: every
/// `load_all` reads the file again, every `save_all` rewrites it in full.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    // Unique per write so overlapping saves never share a temp file.
    fn tmp_path(&self) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = self.file_path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl ProductStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Product>, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(ServiceError::storage)?;
        let products: Vec<Product> = serde_json::from_slice(&bytes).map_err(ServiceError::storage)?;
        debug!(path = %self.file_path.display(), count = products.len(), "loaded products");
        Ok(products)
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(products).map_err(ServiceError::storage)?;
        let tmp = self.tmp_path();
        if let Err(e) = fs::write(&tmp, &data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::storage(e));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ServiceError::storage(e));
        }
        debug!(path = %self.file_path.display(), count = products.len(), "saved products");
        Ok(())
    }
}
