use std::sync::Arc;
use tracing::{info, warn};

use super::ViewCell;
use crate::models::MovieDetails;
use crate::tmdb::CatalogApi;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Found(Box<MovieDetails>),
    NotFound,
}

#[derive(Clone)]
pub struct DetailView {
    catalog: Arc<dyn CatalogApi>,
    cell: Arc<ViewCell<DetailState>>,
}

/// Parses the `/movie/{id}` path segment; blank or non-numeric ids yield `None`.
pub fn parse_movie_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

impl DetailView {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            catalog,
            cell: ViewCell::new("detail", DetailState::default()),
        }
    }

    pub async fn state(&self) -> DetailState {
        self.cell.snapshot().await
    }

    pub fn close(&self) {
        self.cell.close();
    }

    pub async fn mount(&self, raw_id: Option<&str>) {
        let Some(id) = parse_movie_id(raw_id) else {
            info!("Detail view has no usable movie id ({:?})", raw_id);
            self.cell.commit(|s| *s = DetailState::NotFound).await;
            return;
        };

        let next = match self.catalog.details(id).await {
            Ok(Some(details)) => {
                info!("Loaded details for '{}' (tmdb id {})", details.title, id);
                DetailState::Found(Box::new(details))
            }
            Ok(None) => {
                warn!("Empty detail response for tmdb id {}", id);
                DetailState::NotFound
            }
            Err(e) => {
                warn!("Failed to fetch details for tmdb id {}: {:#}", id, e);
                DetailState::NotFound
            }
        };
        self.cell.commit(|s| *s = next).await;
    }
}
