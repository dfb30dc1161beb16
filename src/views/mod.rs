//! Per-view state containers and their fetch lifecycles.
//!
//! Every view owns a [`ViewCell`]. Fetches run without holding the cell's lock and
//! commit their result through [`ViewCell::commit`], which refuses to write once the
//! view has been closed by navigation.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub mod detail;
pub mod home;
pub mod library;

pub use detail::{DetailState, DetailView};
pub use home::{HomeState, HomeView};
pub use library::{LibraryState, LibraryView, LoadOutcome};

pub const LOAD_ERROR: &str = "Failed to fetch movies. Please try again later.";
pub const SEARCH_ERROR: &str = "Search failed. Please try again.";
pub const NO_RESULTS: &str = "No movies found with that title";
pub const NOT_FOUND: &str = "Movie not found";

#[derive(Debug)]
pub struct ViewCell<S> {
    name: &'static str,
    alive: AtomicBool,
    state: Mutex<S>,
}

impl<S: Clone> ViewCell<S> {
    pub fn new(name: &'static str, initial: S) -> Arc<Self> {
        Arc::new(Self {
            name,
            alive: AtomicBool::new(true),
            state: Mutex::new(initial),
        })
    }

    pub async fn snapshot(&self) -> S {
        self.state.lock().await.clone()
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Marks the view as unmounted. Pending fetches keep running but can no longer
    /// write their results.
    pub fn close(&self) {
        if self.alive.swap(false, Ordering::AcqRel) {
            debug!(view = self.name, "View closed");
        }
    }

    /// Applies `update` unless the view was closed; returns `None` when discarded.
    pub async fn commit<R>(&self, update: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut guard = self.state.lock().await;
        if !self.is_alive() {
            debug!(view = self.name, "Discarding update for closed view");
            return None;
        }
        Some(update(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closed_cell_rejects_commits() {
        let cell = ViewCell::new("test", 1u32);
        let bumped = cell
            .commit(|s| {
                *s += 1;
                *s
            })
            .await;
        assert_eq!(bumped, Some(2));
        cell.close();
        assert!(!cell.is_alive());
        assert_eq!(cell.commit(|s| *s += 10).await, None);
        assert_eq!(cell.snapshot().await, 2);
    }
}
