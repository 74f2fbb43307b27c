//! Metric and metric value endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{error_response, links, not_found, require_vendor_json, AppState};
use crate::mock_server::state::{MockMetric, MockMetricValue};
use crate::{MetricValue, Writable};

/// Query parameters for listing metrics.
#[derive(Debug, Default, Deserialize)]
pub struct ListMetricsQuery {
    pub name: Option<String>,
}

/// Query parameters for listing metric values.
#[derive(Debug, Default, Deserialize)]
pub struct ListValuesQuery {
    /// Href of the owner, or a generic URN.
    pub owner: Option<String>,
}

pub fn metric_json(app: &AppState, metric: &MockMetric) -> Value {
    let path = format!("metrics/{}", metric.id);
    let values = format!("{path}/values");
    json!({
        "href": app.href(&path),
        "name": metric.name,
        "type": metric.metric_type,
        "links": links(app, &[
            ("self", path.clone()),
            ("list_metric_values", values.clone()),
            ("create_metric_value", values),
        ]),
    })
}

pub fn metric_value_json(app: &AppState, value: &MockMetricValue) -> Value {
    let metric_path = format!("metrics/{}", value.metric_id);
    let path = format!("{metric_path}/values/{}", value.id);
    json!({
        "href": app.href(&path),
        "metric": {"href": app.href(&metric_path)},
        "owner": app.owner_json(&value.owner),
        "value": value.value,
        "updated_at": value.updated_at,
        "links": links(app, &[("self", path), ("metric", metric_path)]),
    })
}

/// GET /metrics
pub async fn list_metrics(
    State(app): State<AppState>,
    Query(query): Query<ListMetricsQuery>,
) -> impl IntoResponse {
    let state = app.data.read().await;
    let metrics: Vec<Value> = state
        .list_metrics(query.name.as_deref())
        .into_iter()
        .map(|m| metric_json(&app, m))
        .collect();
    Json(metrics)
}

/// GET /metrics/{id}
pub async fn get_metric(State(app): State<AppState>, Path(id): Path<u64>) -> Response {
    let state = app.data.read().await;
    match state.metrics.get(&id) {
        Some(metric) => Json(metric_json(&app, metric)).into_response(),
        None => not_found("metric", id),
    }
}

/// GET /metrics/{id}/values
pub async fn list_metric_values(
    State(app): State<AppState>,
    Path(metric_id): Path<u64>,
    Query(query): Query<ListValuesQuery>,
) -> Response {
    let state = app.data.read().await;
    if !state.metrics.contains_key(&metric_id) {
        return not_found("metric", metric_id);
    }

    let owner = match query.owner.as_deref() {
        Some(href) => match app.parse_owner_filter(href) {
            Some(owner) => Some(owner),
            // Unknown owners own nothing.
            None => return Json(Vec::<Value>::new()).into_response(),
        },
        None => None,
    };

    let values: Vec<Value> = state
        .list_metric_values(metric_id, owner.as_ref())
        .into_iter()
        .map(|v| metric_value_json(&app, v))
        .collect();
    Json(values).into_response()
}

/// POST /metrics/{id}/values
pub async fn create_metric_value(
    State(app): State<AppState>,
    Path(metric_id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = require_vendor_json(&headers, MetricValue::MEDIA_TYPE) {
        return rejection;
    }

    let mut state = app.data.write().await;
    if !state.metrics.contains_key(&metric_id) {
        return not_found("metric", metric_id);
    }

    let Some(owner) = body.get("owner").and_then(|o| app.parse_owner(o)) else {
        return error_response(StatusCode::BAD_REQUEST, "metric value needs a valid owner");
    };
    let value = body.get("value").cloned().unwrap_or(Value::Null);

    let id = state.insert_metric_value(metric_id, owner, value);
    match state.metric_values.get(&id) {
        Some(created) => (StatusCode::CREATED, Json(metric_value_json(&app, created))).into_response(),
        None => not_found("metric value", id),
    }
}

/// GET /metrics/{id}/values/{value_id}
pub async fn get_metric_value(
    State(app): State<AppState>,
    Path((metric_id, value_id)): Path<(u64, u64)>,
) -> Response {
    let state = app.data.read().await;
    match state
        .metric_values
        .get(&value_id)
        .filter(|v| v.metric_id == metric_id)
    {
        Some(value) => Json(metric_value_json(&app, value)).into_response(),
        None => not_found("metric value", value_id),
    }
}

/// PUT /metrics/{id}/values/{value_id}
pub async fn update_metric_value(
    State(app): State<AppState>,
    Path((metric_id, value_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = require_vendor_json(&headers, MetricValue::MEDIA_TYPE) {
        return rejection;
    }

    let owner = match body.get("owner") {
        Some(owner) => match app.parse_owner(owner) {
            Some(owner) => Some(owner),
            None => return error_response(StatusCode::BAD_REQUEST, "invalid owner reference"),
        },
        None => None,
    };

    let mut state = app.data.write().await;
    match state.update_metric_value(metric_id, value_id, owner, body.get("value").cloned()) {
        Some(updated) => Json(metric_value_json(&app, updated)).into_response(),
        None => not_found("metric value", value_id),
    }
}

/// DELETE /metrics/{id}/values/{value_id}
pub async fn delete_metric_value(
    State(app): State<AppState>,
    Path((metric_id, value_id)): Path<(u64, u64)>,
) -> Response {
    let mut state = app.data.write().await;
    if state.delete_metric_value(metric_id, value_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("metric value", value_id)
    }
}
