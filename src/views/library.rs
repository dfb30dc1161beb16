use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::{ViewCell, LOAD_ERROR};
use crate::models::Movie;
use crate::tmdb::{CatalogApi, DiscoverFilters};

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryState {
    pub movies: Vec<Movie>,
    /// Last page that loaded successfully; 0 before the first page arrives.
    pub page: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
}

impl Default for LibraryState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            page: 0,
            loading: true,
            error: None,
            has_more: true,
        }
    }
}

impl LibraryState {
    pub fn can_load_more(&self) -> bool {
        !self.loading && self.has_more
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { page: u32, added: usize },
    Failed,
    /// Another fetch was in flight or the last page was already loaded.
    Skipped,
    /// The view closed before the response arrived.
    Discarded,
}

#[derive(Clone)]
pub struct LibraryView {
    catalog: Arc<dyn CatalogApi>,
    cell: Arc<ViewCell<LibraryState>>,
    first_page: Arc<OnceCell<LoadOutcome>>,
}

impl LibraryView {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            catalog,
            cell: ViewCell::new("library", LibraryState::default()),
            first_page: Arc::new(OnceCell::new()),
        }
    }

    pub async fn state(&self) -> LibraryState {
        self.cell.snapshot().await
    }

    pub fn close(&self) {
        self.cell.close();
    }

    /// Fetches page 1 the first time; later and concurrent callers get the same outcome.
    pub async fn mount(&self) -> LoadOutcome {
        *self.first_page.get_or_init(|| self.fetch_page(1)).await
    }

    pub fn is_mounted(&self) -> bool {
        self.first_page.initialized()
    }

    pub async fn load_more(&self) -> LoadOutcome {
        let next = self
            .cell
            .commit(|s| {
                if !s.can_load_more() {
                    return None;
                }
                s.loading = true;
                Some(s.page + 1)
            })
            .await;
        match next {
            Some(Some(page)) => self.fetch_page(page).await,
            Some(None) => {
                debug!("Library load more skipped");
                LoadOutcome::Skipped
            }
            None => LoadOutcome::Discarded,
        }
    }

    async fn fetch_page(&self, page: u32) -> LoadOutcome {
        let result = self
            .catalog
            .discover(&DiscoverFilters::alphabetical(page))
            .await;
        if let Err(e) = &result {
            warn!("Library page {} failed: {:#}", page, e);
        }
        let committed = self
            .cell
            .commit(|s| {
                s.loading = false;
                match result {
                    Ok(response) => {
                        let added = response.results.len();
                        s.has_more = response.has_more();
                        if page == 1 {
                            s.movies = response.results;
                        } else {
                            s.movies.extend(response.results);
                        }
                        s.page = page;
                        s.error = None;
                        info!(
                            "Library page {}/{} loaded ({} movies total)",
                            response.page,
                            response.total_pages,
                            s.movies.len()
                        );
                        LoadOutcome::Loaded { page, added }
                    }
                    Err(_) => {
                        s.error = Some(LOAD_ERROR.to_string());
                        LoadOutcome::Failed
                    }
                }
            })
            .await;
        committed.unwrap_or(LoadOutcome::Discarded)
    }
}
