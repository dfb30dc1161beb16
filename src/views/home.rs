use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{ViewCell, LOAD_ERROR, SEARCH_ERROR};
use crate::intent::{decide, FetchIntent, SearchFilters};
use crate::models::{Genre, Movie};
use crate::tmdb::CatalogApi;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub filters: SearchFilters,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            genres: Vec::new(),
            filters: SearchFilters::default(),
            loading: true,
            error: None,
        }
    }
}

impl HomeState {
    /// True when the last fetch succeeded with nothing to show.
    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.error.is_none() && self.movies.is_empty()
    }
}

#[derive(Clone)]
pub struct HomeView {
    catalog: Arc<dyn CatalogApi>,
    cell: Arc<ViewCell<HomeState>>,
    initial: Arc<OnceCell<()>>,
}

impl HomeView {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            catalog,
            cell: ViewCell::new("home", HomeState::default()),
            initial: Arc::new(OnceCell::new()),
        }
    }

    pub async fn state(&self) -> HomeState {
        self.cell.snapshot().await
    }

    pub fn close(&self) {
        self.cell.close();
    }

    /// Runs the initial load once per view. Callers arriving while it is in flight
    /// wait for the same load instead of starting another.
    pub async fn mount(&self) {
        self.initial.get_or_init(|| self.load_initial()).await;
    }

    pub fn is_mounted(&self) -> bool {
        self.initial.initialized()
    }

    /// Loads the popular list and the genre catalog together; both must succeed.
    async fn load_initial(&self) {
        let result = tokio::try_join!(self.catalog.popular(1), self.catalog.genres());
        if let Err(e) = &result {
            warn!("Home initial load failed: {:#}", e);
        }
        self.cell
            .commit(|s| {
                match result {
                    Ok((page, genres)) => {
                        info!(
                            "Home loaded {} popular movies and {} genres",
                            page.results.len(),
                            genres.len()
                        );
                        s.movies = page.results;
                        s.genres = genres;
                        s.error = None;
                    }
                    Err(_) => s.error = Some(LOAD_ERROR.to_string()),
                }
                s.loading = false;
            })
            .await;
    }

    /// Replaces the result list according to the search precedence in [`decide`].
    pub async fn search(&self, filters: SearchFilters) {
        let intent = decide(&filters);
        info!("Home search: {:?}", intent);
        let started = self
            .cell
            .commit(|s| {
                s.filters = filters;
                s.loading = true;
                s.error = None;
            })
            .await;
        if started.is_none() {
            return;
        }

        let result = match &intent {
            FetchIntent::Search { query } => self.catalog.search(query, 1).await,
            FetchIntent::Discover(discover) => self.catalog.discover(discover).await,
            FetchIntent::Popular => self.catalog.popular(1).await,
        };
        if let Err(e) = &result {
            warn!("Home search failed: {:#}", e);
        }
        self.cell
            .commit(|s| {
                match result {
                    Ok(page) => s.movies = page.results,
                    Err(_) => s.error = Some(SEARCH_ERROR.to_string()),
                }
                s.loading = false;
            })
            .await;
    }
}
