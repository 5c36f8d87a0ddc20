//! Resource handlers: list, create, read, replace, delete. The kind comes from the first path segment.

use crate::error::AppError;
use crate::response::{page_links, record_links, CreatedBody, LinksBody, PageBody};
use crate::schema::{Record, ResourceKind};
use crate::service::ResourceService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn resolve_kind(path_segment: &str) -> Result<ResourceKind, AppError> {
    ResourceKind::from_path_segment(path_segment).ok_or_else(|| AppError::NotFound(path_segment.to_string()))
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Unparseable or missing `page` means the first page; range clamping happens in the paginator.
fn requested_page(params: &HashMap<String, String>) -> i64 {
    params
        .get("page")
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(1)
}

fn body_to_record(value: Value) -> Result<Record, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let page = ResourceService::list(state.store.as_ref(), kind, requested_page(&params), state.page_size).await?;
    let links = page_links(kind, &page);
    Ok((StatusCode::OK, Json(PageBody { page, links })))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let body = body_to_record(body)?;
    let (id, record) = ResourceService::create(state.store.as_ref(), kind, &body).await?;
    let links = record_links(kind, id, &record);
    Ok((StatusCode::CREATED, Json(CreatedBody { id, links })))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let id = parse_id(&id_str)?;
    let record = ResourceService::read_expanded(state.store.as_ref(), kind, id).await?;
    Ok((StatusCode::OK, Json(record)))
}

pub async fn replace(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let id = parse_id(&id_str)?;
    let body = body_to_record(body)?;
    let record = ResourceService::replace(state.store.as_ref(), kind, id, &body).await?;
    let links = record_links(kind, id, &record);
    Ok((StatusCode::OK, Json(LinksBody { links })))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let id = parse_id(&id_str)?;
    ResourceService::delete(state.store.as_ref(), kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_param_defaults_to_first_page() {
        let mut params = HashMap::new();
        assert_eq!(requested_page(&params), 1);
        params.insert("page".to_string(), "abc".to_string());
        assert_eq!(requested_page(&params), 1);
        params.insert("page".to_string(), "-4".to_string());
        assert_eq!(requested_page(&params), -4);
        params.insert("page".to_string(), "3".to_string());
        assert_eq!(requested_page(&params), 3);
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("4x"), Err(AppError::BadRequest(_))));
    }
}
