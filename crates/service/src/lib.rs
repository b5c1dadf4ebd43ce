//! Record store for the product collection.
//! - `collection` holds the pure query/mutation rules over a loaded collection.
//! - `storage` loads and saves the whole collection as one JSON document.
//! - `product_service` runs each operation as one read plus at most one write.

pub mod collection;
pub mod errors;
pub mod pagination;
pub mod product;
pub mod product_service;
pub mod runtime;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use pagination::Pagination;
pub use product::{Patch, Product};
pub use product_service::ProductService;
