use crate::config::Config;
use crate::intent::{self, SearchFilters};
use crate::render;
use crate::session::Session;
use crate::theme::{Theme, ThemeContext};
use crate::tmdb::{CatalogApi, TmdbClient};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogApi>,
    pub theme: ThemeContext,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogApi>, initial_theme: Theme) -> Self {
        Self {
            catalog,
            theme: ThemeContext::new(initial_theme),
            session: Arc::new(Mutex::new(Session::default())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    genre: Option<String>,
    year: Option<String>,
}

pub async fn run_server(config: Config) -> Result<()> {
    let catalog: Arc<dyn CatalogApi> = Arc::new(TmdbClient::from_config(&config)?);
    let state = AppState::new(catalog, config.theme);
    let session = state.session.clone();
    let app = build_router(state);

    info!("Listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(session))
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search))
        .route("/library", get(library))
        .route("/library/more", post(load_more))
        .route("/movie/", get(detail_without_id))
        .route("/movie/:id", get(detail))
        .route("/theme", post(toggle_theme))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn home(State(state): State<AppState>) -> Response {
    let view = state.session.lock().await.home(&state.catalog);
    view.mount().await;
    let snapshot = view.state().await;
    page(render::home(
        &snapshot,
        state.theme.current(),
        &intent::current_year_options(),
    ))
}

async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Response {
    let view = state.session.lock().await.home(&state.catalog);
    view.mount().await;
    let filters = SearchFilters::from_form(
        query.q.as_deref(),
        query.genre.as_deref(),
        query.year.as_deref(),
    );
    view.search(filters).await;
    let snapshot = view.state().await;
    page(render::home(
        &snapshot,
        state.theme.current(),
        &intent::current_year_options(),
    ))
}

async fn library(State(state): State<AppState>) -> Response {
    let view = state.session.lock().await.library(&state.catalog);
    view.mount().await;
    let snapshot = view.state().await;
    page(render::library(&snapshot, state.theme.current()))
}

async fn load_more(State(state): State<AppState>) -> Redirect {
    let view = state.session.lock().await.library(&state.catalog);
    // A press that arrives before page 1 has loaded only waits for it.
    let ready = view.is_mounted();
    view.mount().await;
    if ready {
        let outcome = view.load_more().await;
        info!("Load more: {:?}", outcome);
    }
    Redirect::to("/library")
}

async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    show_detail(state, Some(id)).await
}

async fn detail_without_id(State(state): State<AppState>) -> Response {
    show_detail(state, None).await
}

async fn show_detail(state: AppState, id: Option<String>) -> Response {
    let view = state.session.lock().await.detail(&state.catalog);
    view.mount(id.as_deref()).await;
    let snapshot = view.state().await;
    page(render::detail(&snapshot, state.theme.current()))
}

async fn toggle_theme(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    state.theme.toggle();
    let back = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(local_path)
        .unwrap_or_else(|| "/".to_string());
    Redirect::to(&back)
}

async fn not_found(State(state): State<AppState>) -> Response {
    match render::not_found(state.theme.current()) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => render_failure(e),
    }
}

fn page(rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failure(e),
    }
}

fn render_failure(e: anyhow::Error) -> Response {
    error!("Page render failed: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
}

/// Keeps only the path (and query) of a Referer so redirects never leave the app.
fn local_path(referer: &str) -> Option<String> {
    let after_scheme = referer
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(referer);
    let path = match after_scheme.find('/') {
        Some(i) if referer.contains("://") => &after_scheme[i..],
        Some(_) => after_scheme,
        None => return None,
    };
    if path.starts_with('/') && !path.starts_with("//") {
        Some(path.to_string())
    } else {
        None
    }
}

/// Resolves on Ctrl+C or SIGTERM, after unmounting the current view so catalog
/// responses still in flight are dropped.
async fn shutdown_signal(session: Arc<Mutex<Session>>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let source = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    let mut session = session.lock().await;
    info!(
        view = session.active_name().unwrap_or("none"),
        "Shutdown signal received ({}), closing the mounted view", source
    );
    session.close_active();
}
