use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use finder_core::{find_flights, SearchForm, SearchResults, NO_FLIGHTS_MESSAGE};
use tracing::Instrument;
use uuid::Uuid;

use crate::{error::AppError, render, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(submit_search_form))
        .route("/v1/flights/search", post(search_flights))
}

async fn run_search(state: &AppState, form: &SearchForm) -> Result<SearchResults, AppError> {
    let span = tracing::info_span!("search", search_id = %Uuid::new_v4());
    find_flights(state.provider.as_ref(), form)
        .instrument(span)
        .await
        .map_err(AppError::from)
}

// ============================================================================
// HTML Handlers
// ============================================================================

/// GET /
async fn index() -> Html<String> {
    Html(render::index_page(None))
}

/// POST /
/// Form submission; errors re-render the form with a message
async fn submit_search_form(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Response {
    match run_search(&state, &form).await {
        Ok(results) if results.has_outbound() => Html(render::results_page(&results)).into_response(),
        Ok(_) => (StatusCode::OK, Html(render::index_page(Some(NO_FLIGHTS_MESSAGE)))).into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Html(render::index_page(Some(&err.user_message())))).into_response()
        }
    }
}

// ============================================================================
// JSON Handlers
// ============================================================================

/// POST /v1/flights/search
async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<SearchForm>, JsonRejection>,
) -> Result<Json<SearchResults>, AppError> {
    let Json(form) = payload?;
    let results = run_search(&state, &form).await?;
    if !results.has_outbound() {
        return Err(AppError::NotFoundError(NO_FLIGHTS_MESSAGE.to_string()));
    }
    Ok(Json(results))
}
