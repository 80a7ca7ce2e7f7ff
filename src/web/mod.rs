//! Web layer: routes, handlers and server setup.

use std::num::NonZeroU16;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::catalog::{Catalog, ImageRecord};
use crate::constants::{API_VERSION, SAMPLE_IMAGE_COUNT};
use crate::error::GhibliscapeError;

mod views;

use views::{ApiDocsTemplate, HomeTemplate};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    catalog: Arc<Catalog>,
}

impl AppState {
    fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

/// Query parameters accepted by the image and redirect endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageParams {
    id: Option<String>,
    q: Option<String>,
}

impl ImageParams {
    /// Empty values count as missing, so `?id=` behaves like no `id` at all.
    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn q(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

/// JSON body for query lookups: the record plus the digest that selected it.
#[derive(Debug, Serialize)]
struct QueryImageResponse {
    #[serde(flatten)]
    image: ImageRecord,
    query: String,
    query_hash: String,
}

#[derive(Debug, Serialize)]
struct FilmListResponse {
    film_codes: Vec<String>,
}

async fn root_handler(State(state): State<AppState>) -> Result<HomeTemplate, GhibliscapeError> {
    let catalog = &state.catalog;
    let random_image = catalog.random_pick().ok().cloned();
    let sample_images = catalog
        .random_sample(SAMPLE_IMAGE_COUNT)
        .into_iter()
        .cloned()
        .collect();

    Ok(HomeTemplate {
        image_count: catalog.len(),
        film_count: catalog.film_codes().len(),
        film_codes: catalog.film_codes().to_vec(),
        random_image,
        sample_images,
    })
}

async fn api_docs_handler(
    State(state): State<AppState>,
) -> Result<ApiDocsTemplate, GhibliscapeError> {
    Ok(ApiDocsTemplate {
        api_version: API_VERSION,
        image_count: state.catalog.len(),
        film_count: state.catalog.film_codes().len(),
    })
}

async fn api_random_handler(
    State(state): State<AppState>,
) -> Result<Json<ImageRecord>, GhibliscapeError> {
    let image = state.catalog.random_pick()?;
    Ok(Json(image.clone()))
}

async fn api_image_handler(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Result<Response, GhibliscapeError> {
    if let Some(id) = params.id() {
        let image = state.catalog.get_by_id(id)?;
        return Ok(Json(image.clone()).into_response());
    }

    let query = params.q().ok_or(GhibliscapeError::BadRequest)?;
    let (image, query_hash) = state.catalog.get_by_query(query)?;
    Ok(Json(QueryImageResponse {
        image: image.clone(),
        query: query.to_string(),
        query_hash,
    })
    .into_response())
}

async fn api_films_handler(State(state): State<AppState>) -> Json<FilmListResponse> {
    Json(FilmListResponse {
        film_codes: state.catalog.film_codes().to_vec(),
    })
}

async fn api_film_handler(
    State(state): State<AppState>,
    Path(film_code): Path<String>,
) -> Result<Json<ImageRecord>, GhibliscapeError> {
    let image = state.catalog.get_by_film(&film_code)?;
    Ok(Json(image.clone()))
}

async fn redirect_random_handler(
    State(state): State<AppState>,
) -> Result<Redirect, GhibliscapeError> {
    let image = state.catalog.random_pick()?;
    Ok(Redirect::to(&image.url))
}

async fn redirect_image_handler(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Result<Redirect, GhibliscapeError> {
    if let Some(id) = params.id() {
        let image = state.catalog.get_by_id(id)?;
        return Ok(Redirect::to(&image.url));
    }

    let query = params.q().ok_or(GhibliscapeError::BadRequest)?;
    let (image, _) = state.catalog.get_by_query(query)?;
    Ok(Redirect::to(&image.url))
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

async fn script_handler() -> impl IntoResponse {
    const SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/main.js"));
    ([(CONTENT_TYPE, "text/javascript")], SCRIPT)
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(root_handler))
        .route("/api", axum::routing::get(api_docs_handler))
        .route("/api/random", axum::routing::get(api_random_handler))
        .route("/api/image", axum::routing::get(api_image_handler))
        .route("/api/films", axum::routing::get(api_films_handler))
        .route("/api/film/{film_code}", axum::routing::get(api_film_handler))
        .route(
            "/api/redirect/random",
            axum::routing::get(redirect_random_handler),
        )
        .route("/api/redirect", axum::routing::get(redirect_image_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route("/static/main.js", axum::routing::get(script_handler))
        .layer(CorsLayer::permissive())
}

/// Starts the HTTP server against an immutable catalog snapshot.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    catalog: Arc<Catalog>,
) -> Result<(), anyhow::Error> {
    let app = create_router().with_state(AppState::new(catalog));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}
