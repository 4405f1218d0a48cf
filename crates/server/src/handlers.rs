use std::any::Any;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use matchcount_core::models::{Identity, MatchResults, TimeWindow};
use matchcount_core::utils::time::parse_date;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GamesQuery {
    pub from: Option<String>,
}

/// `GET /games/{platform_type}/{account_id}/{character_id}?from=YYYY-MM-DD`
pub async fn get_games(
    State(state): State<AppState>,
    path: Result<Path<(String, String, String)>, PathRejection>,
    query: Result<Query<GamesQuery>, QueryRejection>,
) -> Result<Json<MatchResults>, ApiError> {
    let to = Utc::now().date_naive();
    let Query(query) = query?;
    let from = match query.from.as_deref() {
        None | Some("") => None,
        Some(value) => Some(parse_date(value).map_err(|_| ApiError::InvalidForm)?),
    };

    let Path((platform_type, account_id, character_id)) = path?;
    if ![&platform_type, &account_id, &character_id]
        .iter()
        .all(|id| is_numeric_id(id))
    {
        return Err(ApiError::InvalidUrl);
    }

    let identity = Identity::new(platform_type, account_id, character_id);
    let window = TimeWindow::ending_on(to, from);

    let results = state
        .counter()
        .get_results(&identity, &window)
        .await
        .inspect_err(|e| tracing::info!(%identity, error = %e, "match count failed"))?;

    Ok(Json(results))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn handler_404() -> ApiError {
    ApiError::NotFound
}

/// Turns a panic anywhere below the router into a plain 500
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(error = %detail, "request handler panicked");

    ApiError::InternalServerError.into_response()
}

fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
