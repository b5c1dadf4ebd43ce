//! Persistence for the product collection.
//!
//! A store reads and writes the whole collection at once; there is no
//! partial or incremental representation.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::product::Product;

pub mod json_file_store;

pub use json_file_store::JsonFileStore;

/// Whole-collection persistence. Implementations can be file-backed or
/// anything else that can round-trip a `Vec<Product>`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Read and parse the persisted collection.
    async fn load_all(&self) -> Result<Vec<Product>, ServiceError>;
    /// Replace the persisted collection with `products`.
    async fn save_all(&self, products: &[Product]) -> Result<(), ServiceError>;
}
