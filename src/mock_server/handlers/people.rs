//! User and team endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{links, not_found, AppState};
use crate::mock_server::state::{MockTeam, MockUser};

/// Query parameters for listing users.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub email: Option<String>,
}

/// Query parameters for listing teams.
#[derive(Debug, Default, Deserialize)]
pub struct ListTeamsQuery {
    pub name: Option<String>,
}

pub fn user_json(app: &AppState, user: &MockUser) -> Value {
    let path = format!("users/{}", user.id);
    json!({
        "href": app.href(&path),
        "first_name": user.first_name,
        "last_name": user.last_name,
        "email": user.email,
        "links": links(app, &[("self", path)]),
    })
}

pub fn team_json(app: &AppState, team: &MockTeam) -> Value {
    let path = format!("teams/{}", team.id);
    json!({
        "href": app.href(&path),
        "name": team.name,
        "links": links(app, &[("self", path)]),
    })
}

/// GET /users
pub async fn list_users(
    State(app): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let state = app.data.read().await;
    let users: Vec<Value> = state
        .list_users(query.email.as_deref())
        .into_iter()
        .map(|u| user_json(&app, u))
        .collect();
    Json(users)
}

/// GET /users/{id}
pub async fn get_user(State(app): State<AppState>, Path(id): Path<u64>) -> Response {
    let state = app.data.read().await;
    match state.users.get(&id) {
        Some(user) => Json(user_json(&app, user)).into_response(),
        None => not_found("user", id),
    }
}

/// GET /teams
pub async fn list_teams(
    State(app): State<AppState>,
    Query(query): Query<ListTeamsQuery>,
) -> impl IntoResponse {
    let state = app.data.read().await;
    let teams: Vec<Value> = state
        .list_teams(query.name.as_deref())
        .into_iter()
        .map(|t| team_json(&app, t))
        .collect();
    Json(teams)
}

/// GET /teams/{id}
pub async fn get_team(State(app): State<AppState>, Path(id): Path<u64>) -> Response {
    let state = app.data.read().await;
    match state.teams.get(&id) {
        Some(team) => Json(team_json(&app, team)).into_response(),
        None => not_found("team", id),
    }
}
