use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use service::{Pagination, Patch, Product};

use crate::errors::ApiError;
use crate::state::AppState;

/// Raw listing parameters. Kept as strings so bad numbers fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Picks each known key on its own; the first occurrence wins and
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "search" => &mut params.search,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Ids that do not parse as integers cannot match any record.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::not_found())
}

pub async fn list_products(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let params = ListParams::from_pairs(pairs.map(|Query(p)| p).unwrap_or_default());
    let pagination = Pagination::from_query(params.page.as_deref(), params.limit.as_deref());
    let products = state.products.list(params.search.as_deref(), pagination).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    state.products.get(id).await?.map(Json).ok_or_else(ApiError::not_found)
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Patch>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(partial) = payload?;
    let created = state.products.create(partial).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Patch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    state.products.update(id, patch).await?.map(Json).ok_or_else(ApiError::not_found)
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.products.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn repeated_key_does_not_discard_the_others() {
        let params = ListParams::from_pairs(pairs(&[
            ("search", "a"),
            ("search", "zzz"),
            ("limit", "1"),
            ("color", "red"),
        ]));
        assert_eq!(
            params,
            ListParams { page: None, limit: Some("1".into()), search: Some("a".into()) }
        );
    }

    #[test]
    fn no_pairs_means_no_params() {
        assert_eq!(ListParams::from_pairs(Vec::new()), ListParams::default());
    }

    #[test]
    fn malformed_ids_are_not_found() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id("-3").unwrap(), -3);
        for raw in ["abc", "1.5", "", "99999999999999999999"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::NOT_FOUND);
        }
    }
}
