//! Request handlers

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::{ApiError, JsonError};
use super::SharedState;
use crate::catalog::{CatalogEntry, CatalogKind, Category};
use crate::markdown::PackageManager;

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, Default, Deserialize)]
pub struct MarkdownQuery {
    /// Package manager for the default install command
    pub pm: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Compact entry view used in listings and prev/next links
#[derive(Debug, Clone, Serialize)]
pub struct EntrySummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub url: String,
    pub markdown_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub url: String,
    pub markdown_url: String,
    pub prev: Option<EntrySummary>,
    pub next: Option<EntrySummary>,
}

fn summarize(state: &SharedState, kind: CatalogKind, entry: &CatalogEntry) -> EntrySummary {
    EntrySummary {
        id: entry.id.clone(),
        title: entry.title.clone(),
        description: entry.description.clone(),
        category: entry.category,
        url: state.generator.entry_url(kind, &entry.id),
        markdown_url: state.generator.markdown_url(kind, &entry.id),
    }
}

/// Pull the id out of the wildcard tail of `/{kind}/{id}/markdown`.
///
/// Returns `Some("")` for `/{kind}//markdown` and `None` when the tail does
/// not end in `/markdown`.
fn markdown_id(tail: &str) -> Option<&str> {
    let tail = tail.strip_prefix('/').unwrap_or(tail);
    if tail == "markdown" {
        return Some("");
    }
    tail.strip_suffix("/markdown")
}

pub async fn component_markdown(
    State(state): State<SharedState>,
    Path(tail): Path<String>,
    Query(query): Query<MarkdownQuery>,
) -> Result<Response, ApiError> {
    markdown_response(&state, CatalogKind::Components, &tail, &query)
}

pub async fn block_markdown(
    State(state): State<SharedState>,
    Path(tail): Path<String>,
    Query(query): Query<MarkdownQuery>,
) -> Result<Response, ApiError> {
    markdown_response(&state, CatalogKind::Blocks, &tail, &query)
}

fn markdown_response(
    state: &SharedState,
    kind: CatalogKind,
    tail: &str,
    query: &MarkdownQuery,
) -> Result<Response, ApiError> {
    let id = markdown_id(tail).ok_or(ApiError::UnknownRoute)?.trim();
    if id.is_empty() {
        return Err(ApiError::MissingId(kind));
    }

    let package_manager = match query.pm.as_deref() {
        Some(pm) => pm
            .parse::<PackageManager>()
            .map_err(|e| ApiError::BadQuery(e.to_string()))?,
        None => PackageManager::default(),
    };

    let entry = state
        .registry
        .catalog(kind)
        .get_by_id(id)
        .ok_or_else(|| ApiError::NotFound {
            kind,
            id: id.to_string(),
        })?;

    let body = state
        .generator
        .render_entry(kind, entry, package_manager)
        .map_err(|source| ApiError::Render {
            kind,
            id: id.to_string(),
            source,
        })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, MARKDOWN_CONTENT_TYPE),
            (header::CACHE_CONTROL, state.cache_control.as_str()),
        ],
        body,
    )
        .into_response())
}

pub async fn list_entries(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EntrySummary>>, JsonError> {
    let kind: CatalogKind = kind.parse().map_err(|_| ApiError::UnknownRoute)?;
    let catalog = state.registry.catalog(kind);

    let mut entries: Vec<&CatalogEntry> = match query.q.as_deref() {
        Some(q) if !q.trim().is_empty() => catalog.search(q),
        _ => catalog.list_all().iter().collect(),
    };

    if let Some(category) = query.category.as_deref() {
        let category = category
            .parse::<Category>()
            .map_err(|e| ApiError::BadQuery(e.to_string()))?;
        entries.retain(|e| e.category == Some(category));
    }

    Ok(Json(
        entries
            .into_iter()
            .map(|e| summarize(&state, kind, e))
            .collect(),
    ))
}

pub async fn show_entry(
    State(state): State<SharedState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<EntryDetail>, JsonError> {
    let kind: CatalogKind = kind.parse().map_err(|_| ApiError::UnknownRoute)?;
    let catalog = state.registry.catalog(kind);
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::MissingId(kind).into());
    }

    let entry = catalog.get_by_id(id).ok_or_else(|| ApiError::NotFound {
        kind,
        id: id.to_string(),
    })?;
    let nav = catalog.prev_next(id);

    Ok(Json(EntryDetail {
        entry: entry.clone(),
        url: state.generator.entry_url(kind, id),
        markdown_url: state.generator.markdown_url(kind, id),
        prev: nav.prev.map(|e| summarize(&state, kind, e)),
        next: nav.next.map(|e| summarize(&state, kind, e)),
    }))
}

pub async fn llms_index(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let body = state
        .generator
        .render_index(&state.registry)
        .map_err(ApiError::IndexRender)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, TEXT_CONTENT_TYPE),
            (header::CACHE_CONTROL, state.cache_control.as_str()),
        ],
        body,
    )
        .into_response())
}

pub async fn health() -> &'static str {
    "ok"
}
