//! Query and mutation rules over a fully loaded product collection.
//!
//! Nothing here touches storage: callers load the collection, apply one
//! of these functions and, for mutations, save the sequence they get back.

use configs::IdStrategy;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::product::{Patch, Product};

/// `1` for an empty collection, otherwise the last element's id + 1.
/// `None` once that id is `i64::MAX`.
///
/// This follows array order, not the largest id: a collection that is out
/// of id order can hand out an id that is already taken.
pub fn next_id(products: &[Product]) -> Option<i64> {
    products.last().map_or(Some(1), |p| p.id.checked_add(1))
}

/// `1` for an empty collection, otherwise the largest id + 1.
pub fn next_id_after_max(products: &[Product]) -> Option<i64> {
    products.iter().map(|p| p.id).max().map_or(Some(1), |id| id.checked_add(1))
}

pub fn assign_id(strategy: IdStrategy, products: &[Product]) -> Result<i64, ServiceError> {
    let next = match strategy {
        IdStrategy::LastPlusOne => next_id(products),
        IdStrategy::MaxPlusOne => next_id_after_max(products),
    };
    next.ok_or_else(|| ServiceError::storage("id space exhausted"))
}

/// Case-insensitive substring match on `description`. Records without a
/// string description never match.
pub fn filter_by_description(products: Vec<Product>, needle: &str) -> Vec<Product> {
    let needle = needle.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.description().is_some_and(|d| d.to_lowercase().contains(&needle)))
        .collect()
}

/// The requested page of `products` in current array order.
pub fn paginate(products: Vec<Product>, pagination: Pagination) -> Vec<Product> {
    match pagination.bounds(products.len()) {
        Some(range) => products.into_iter().skip(range.start).take(range.len()).collect(),
        None => Vec::new(),
    }
}

/// Filter first, then slice, so the page applies to the matching records.
pub fn query(
    products: Vec<Product>,
    search: Option<&str>,
    pagination: Pagination,
) -> Vec<Product> {
    let products = match search.filter(|s| !s.is_empty()) {
        Some(needle) => filter_by_description(products, needle),
        None => products,
    };
    paginate(products, pagination)
}

pub fn find_by_id(products: &[Product], id: i64) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Append a new record with an assigned id. Fails without touching the
/// collection when no id is left to assign.
pub fn insert(
    mut products: Vec<Product>,
    partial: Patch,
    strategy: IdStrategy,
) -> Result<(Vec<Product>, Product), ServiceError> {
    let created = Product::new(assign_id(strategy, &products)?, partial);
    products.push(created.clone());
    Ok((products, created))
}

/// Shallow-merge `patch` into the first record with `id`. `None` when absent.
pub fn update(
    mut products: Vec<Product>,
    id: i64,
    patch: Patch,
) -> Option<(Vec<Product>, Product)> {
    let existing = products.iter_mut().find(|p| p.id == id)?;
    existing.merge(patch);
    let updated = existing.clone();
    Some((products, updated))
}

/// Drop every record with `id`; the flag reports whether anything went.
pub fn remove(products: Vec<Product>, id: i64) -> (Vec<Product>, bool) {
    let before = products.len();
    let kept: Vec<Product> = products.into_iter().filter(|p| p.id != id).collect();
    let removed = kept.len() != before;
    (kept, removed)
}
