#![allow(dead_code)]

use moviematic::models::{Genre, Movie, MovieDetails, Page};
use moviematic::tmdb::{CatalogApi, DiscoverFilters, SortKey};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Popular(u32),
    Search(String, u32),
    Discover(DiscoverFilters),
    Details(i64),
    Genres,
}

/// In-memory catalog that records every call and can fail or stall on demand.
#[derive(Default)]
pub struct FakeCatalog {
    pub popular: Vec<Movie>,
    pub search: HashMap<String, Vec<Movie>>,
    pub filtered: Vec<Movie>,
    pub library_pages: Vec<Vec<Movie>>,
    pub genres: Vec<Genre>,
    pub details: HashMap<i64, MovieDetails>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub calls: Mutex<Vec<Call>>,
    /// When set, every call waits for a notification before answering.
    pub gate: Option<Arc<Notify>>,
}

impl FakeCatalog {
    pub fn fail(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().remove(endpoint);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn discover_calls(&self) -> Vec<DiscoverFilters> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Discover(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    async fn answer(&self, call: Call, endpoint: &'static str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.failing.lock().unwrap().contains(endpoint) {
            anyhow::bail!("{} unavailable", endpoint);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogApi for FakeCatalog {
    async fn popular(&self, page: u32) -> anyhow::Result<Page<Movie>> {
        self.answer(Call::Popular(page), "popular").await?;
        Ok(single_page(self.popular.clone()))
    }

    async fn search(&self, query: &str, page: u32) -> anyhow::Result<Page<Movie>> {
        self.answer(Call::Search(query.to_string(), page), "search")
            .await?;
        Ok(single_page(
            self.search.get(query).cloned().unwrap_or_default(),
        ))
    }

    async fn discover(&self, filters: &DiscoverFilters) -> anyhow::Result<Page<Movie>> {
        self.answer(Call::Discover(filters.clone()), "discover")
            .await?;
        if filters.sort == SortKey::PopularityDesc {
            return Ok(single_page(self.filtered.clone()));
        }
        let total_pages = self.library_pages.len() as u32;
        let results = self
            .library_pages
            .get((filters.page as usize).saturating_sub(1))
            .cloned()
            .unwrap_or_default();
        Ok(Page {
            results,
            page: filters.page,
            total_pages,
        })
    }

    async fn details(&self, id: i64) -> anyhow::Result<Option<MovieDetails>> {
        self.answer(Call::Details(id), "details").await?;
        Ok(self.details.get(&id).cloned())
    }

    async fn genres(&self) -> anyhow::Result<Vec<Genre>> {
        self.answer(Call::Genres, "genres").await?;
        Ok(self.genres.clone())
    }
}

pub fn single_page(results: Vec<Movie>) -> Page<Movie> {
    Page {
        results,
        page: 1,
        total_pages: 1,
    }
}

pub fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/poster-{id}.jpg")),
        release_date: "2001-05-16".to_string(),
        vote_average: 7.2,
    }
}

pub fn movies(range: std::ops::Range<i64>, prefix: &str) -> Vec<Movie> {
    range.map(|i| movie(i, &format!("{prefix} {i}"))).collect()
}

pub fn genres() -> Vec<Genre> {
    vec![
        Genre {
            id: 28,
            name: "Action".to_string(),
        },
        Genre {
            id: 18,
            name: "Drama".to_string(),
        },
    ]
}

pub fn details(id: i64, title: &str) -> MovieDetails {
    MovieDetails {
        id,
        title: title.to_string(),
        overview: "A crew answers a distress call.".to_string(),
        poster_path: Some("/alien-poster.jpg".to_string()),
        backdrop_path: Some("/alien-backdrop.jpg".to_string()),
        release_date: "1979-05-25".to_string(),
        vote_average: 8.1,
        runtime: Some(117),
        genres: vec![
            Genre {
                id: 27,
                name: "Horror".to_string(),
            },
            Genre {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ],
    }
}

pub async fn wait_for_calls(catalog: &FakeCatalog, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if catalog.calls.lock().unwrap().len() >= expected {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            panic!(
                "timed out waiting for {} calls (got {})",
                expected,
                catalog.calls.lock().unwrap().len()
            );
        }
        tokio::task::yield_now().await;
    }
}
