//! Newsflash and newsflash event endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    error_response, links, not_found, require_vendor_json, writable_fields, AppState,
};
use crate::mock_server::state::{MockNewsflash, MockNewsflashEvent};
use crate::{Newsflash, NewsflashEvent, Writable};

/// Query parameters for listing newsflashes.
#[derive(Debug, Default, Deserialize)]
pub struct ListNewsflashesQuery {
    pub name: Option<String>,
}

pub fn newsflash_json(app: &AppState, newsflash: &MockNewsflash) -> Value {
    let path = format!("newsflashes/{}", newsflash.id);
    let events = format!("{path}/events");
    json!({
        "href": app.href(&path),
        "name": newsflash.name,
        "nickname": newsflash.nickname,
        "links": links(app, &[("self", path), ("create_newsflash_event", events)]),
    })
}

pub fn newsflash_event_json(app: &AppState, event: &MockNewsflashEvent) -> Value {
    let newsflash_path = format!("newsflashes/{}", event.newsflash_id);
    let path = format!("{newsflash_path}/events/{}", event.id);

    let mut body = event.fields.clone();
    body.insert("href".to_string(), Value::String(app.href(&path)));
    body.insert(
        "links".to_string(),
        links(app, &[("self", path), ("newsflash", newsflash_path)]),
    );
    Value::Object(body)
}

/// GET /newsflashes
pub async fn list_newsflashes(
    State(app): State<AppState>,
    Query(query): Query<ListNewsflashesQuery>,
) -> impl IntoResponse {
    let state = app.data.read().await;
    let newsflashes: Vec<Value> = state
        .list_newsflashes(query.name.as_deref())
        .into_iter()
        .map(|n| newsflash_json(&app, n))
        .collect();
    Json(newsflashes)
}

/// GET /newsflashes/{id}
pub async fn get_newsflash(State(app): State<AppState>, Path(id): Path<u64>) -> Response {
    let state = app.data.read().await;
    match state.newsflashes.get(&id) {
        Some(newsflash) => Json(newsflash_json(&app, newsflash)).into_response(),
        None => not_found("newsflash", id),
    }
}

/// POST /newsflashes
pub async fn create_newsflash(
    State(app): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = require_vendor_json(&headers, Newsflash::MEDIA_TYPE) {
        return rejection;
    }

    let Some(name) = body.get("name").and_then(Value::as_str) else {
        return error_response(StatusCode::BAD_REQUEST, "newsflash needs a name");
    };
    let nickname = body
        .get("nickname")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut state = app.data.write().await;
    let id = state.insert_newsflash(name.to_string(), nickname);
    match state.newsflashes.get(&id) {
        Some(created) => (StatusCode::CREATED, Json(newsflash_json(&app, created))).into_response(),
        None => not_found("newsflash", id),
    }
}

/// POST /newsflashes/{id}/events
pub async fn create_newsflash_event(
    State(app): State<AppState>,
    Path(newsflash_id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = require_vendor_json(&headers, NewsflashEvent::MEDIA_TYPE) {
        return rejection;
    }

    let fields = writable_fields(&body);
    if !fields.get("title").is_some_and(Value::is_string) {
        return error_response(StatusCode::BAD_REQUEST, "newsflash event needs a title");
    }
    if let Some(owner) = fields.get("owner") {
        if app.parse_owner(owner).is_none() {
            return error_response(StatusCode::BAD_REQUEST, "invalid owner reference");
        }
    }

    let mut state = app.data.write().await;
    if !state.newsflashes.contains_key(&newsflash_id) {
        return not_found("newsflash", newsflash_id);
    }

    let id = state.insert_newsflash_event(newsflash_id, fields);
    match state.newsflash_events.get(&id) {
        Some(created) => {
            (StatusCode::CREATED, Json(newsflash_event_json(&app, created))).into_response()
        }
        None => not_found("newsflash event", id),
    }
}

/// GET /newsflashes/{id}/events/{event_id}
pub async fn get_newsflash_event(
    State(app): State<AppState>,
    Path((newsflash_id, event_id)): Path<(u64, u64)>,
) -> Response {
    let state = app.data.read().await;
    match state
        .newsflash_events
        .get(&event_id)
        .filter(|e| e.newsflash_id == newsflash_id)
    {
        Some(event) => Json(newsflash_event_json(&app, event)).into_response(),
        None => not_found("newsflash event", event_id),
    }
}
