//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::query::{QueryInput, Reduction, SearchError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/search", post(search_page))
        .route("/swap", post(swap_page))
        .route("/cheapest", post(cheapest_page))
        .route("/fastest", post(fastest_page))
        .route("/api/search", get(search_api))
        .route("/api/cheapest", post(cheapest_api))
        .route("/api/fastest", post(fastest_api))
        .route("/api/places", get(places_api))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The explorer page, showing the session's current results.
async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    let page = IndexTemplate::new(&state.catalog, FormView::blank(today()), session.state());
    render(page, StatusCode::OK)
}

/// Run a search from the form and show the results.
async fn search_page(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let input = match form.to_input(today()) {
        Ok(input) => input,
        Err(e) => return form_error(&state, &form, e.to_string()).await,
    };

    let mut session = state.session.lock().await;
    let outcome = session.search_input(&input);
    let page = IndexTemplate::new(&state.catalog, FormView::from_input(&input), session.state());

    match outcome {
        Ok(_) => render(page, StatusCode::OK),
        Err(e) => render(page.with_error(e.to_string()), search_error_status(&e)),
    }
}

/// Exchange origin and destination in the form. Results are untouched.
async fn swap_page(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let mut input = match form.to_input(today()) {
        Ok(input) => input,
        Err(e) => return form_error(&state, &form, e.to_string()).await,
    };
    input.swap();

    let session = state.session.lock().await;
    let page = IndexTemplate::new(&state.catalog, FormView::from_input(&input), session.state());
    render(page, StatusCode::OK)
}

async fn cheapest_page(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    reduce_page(state, form, Reduction::Cheapest).await
}

async fn fastest_page(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    reduce_page(state, form, Reduction::Fastest).await
}

/// Narrow the current results and show what is left.
///
/// The form is only echoed back; reducing works on the results of the last
/// search, not on the form's values.
async fn reduce_page(state: AppState, form: SearchForm, by: Reduction) -> Result<Response, AppError> {
    let form_view = FormView::from_form(&form, today());

    let mut session = state.session.lock().await;
    let outcome = session.reduce(by);
    let page = IndexTemplate::new(&state.catalog, form_view, session.state());

    match outcome {
        Ok(_) => render(page, StatusCode::OK),
        Err(e) => render(page.with_error(e.to_string()), search_error_status(&e)),
    }
}

/// Re-render the page with the submitted values and an error message.
async fn form_error(state: &AppState, form: &SearchForm, message: String) -> Result<Response, AppError> {
    debug!(%message, "Rejected search form");
    let view = FormView::from_form(form, today());

    let session = state.session.lock().await;
    let page = IndexTemplate::new(&state.catalog, view, session.state()).with_error(message);
    render(page, StatusCode::BAD_REQUEST)
}

fn render(page: IndexTemplate, status: StatusCode) -> Result<Response, AppError> {
    let html = page.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok((status, Html(html)).into_response())
}

fn search_error_status(e: &SearchError) -> StatusCode {
    match e {
        SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        SearchError::InvalidRecord(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Search for trips, answering in JSON.
async fn search_api(
    State(state): State<AppState>,
    Query(form): Query<SearchForm>,
) -> Result<Json<SearchResponse>, AppError> {
    let input: QueryInput = form.to_input(today()).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let mut session = state.session.lock().await;
    let trips = session.search_input(&input)?;
    Ok(Json(SearchResponse::new(
        session.state(),
        Some(input.date),
        &trips,
    )))
}

async fn cheapest_api(State(state): State<AppState>) -> Result<Json<SearchResponse>, AppError> {
    reduce_api(state, Reduction::Cheapest).await
}

async fn fastest_api(State(state): State<AppState>) -> Result<Json<SearchResponse>, AppError> {
    reduce_api(state, Reduction::Fastest).await
}

async fn reduce_api(state: AppState, by: Reduction) -> Result<Json<SearchResponse>, AppError> {
    let mut session = state.session.lock().await;
    let trips = session.reduce(by)?;
    Ok(Json(SearchResponse::new(session.state(), None, &trips)))
}

/// Places and operators for filling dropdowns.
async fn places_api(State(state): State<AppState>) -> Json<PlacesResponse> {
    Json(PlacesResponse::from_catalog(&state.catalog))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidQuery(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            SearchError::InvalidRecord(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "Bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
