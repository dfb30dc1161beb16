//! The single mounted view of the running front end.
use std::sync::Arc;
use tracing::debug;

use crate::tmdb::CatalogApi;
use crate::views::{DetailView, HomeView, LibraryView};

#[derive(Clone)]
pub enum ActiveView {
    Home(HomeView),
    Library(LibraryView),
    Detail(DetailView),
}

impl ActiveView {
    fn name(&self) -> &'static str {
        match self {
            ActiveView::Home(_) => "home",
            ActiveView::Library(_) => "library",
            ActiveView::Detail(_) => "detail",
        }
    }

    fn close(&self) {
        match self {
            ActiveView::Home(v) => v.close(),
            ActiveView::Library(v) => v.close(),
            ActiveView::Detail(v) => v.close(),
        }
    }
}

#[derive(Default)]
pub struct Session {
    active: Option<ActiveView>,
}

impl Session {
    pub fn active_name(&self) -> Option<&'static str> {
        self.active.as_ref().map(ActiveView::name)
    }

    /// Keeps the mounted Home view, or closes whatever is mounted and starts a new one.
    /// Callers run [`HomeView::mount`] either way; only the first call fetches.
    pub fn home(&mut self, catalog: &Arc<dyn CatalogApi>) -> HomeView {
        if let Some(ActiveView::Home(view)) = &self.active {
            return view.clone();
        }
        let view = HomeView::new(catalog.clone());
        self.replace(ActiveView::Home(view.clone()));
        view
    }

    pub fn library(&mut self, catalog: &Arc<dyn CatalogApi>) -> LibraryView {
        if let Some(ActiveView::Library(view)) = &self.active {
            return view.clone();
        }
        let view = LibraryView::new(catalog.clone());
        self.replace(ActiveView::Library(view.clone()));
        view
    }

    /// Detail views are never reused: every navigation carries its own id.
    pub fn detail(&mut self, catalog: &Arc<dyn CatalogApi>) -> DetailView {
        let view = DetailView::new(catalog.clone());
        self.replace(ActiveView::Detail(view.clone()));
        view
    }

    /// Unmounts the current view so fetches still in flight drop their results.
    pub fn close_active(&mut self) {
        if let Some(previous) = self.active.take() {
            debug!(view = previous.name(), "Closing view");
            previous.close();
        }
    }

    fn replace(&mut self, next: ActiveView) {
        if let Some(previous) = self.active.take() {
            debug!(from = previous.name(), to = next.name(), "Navigating");
            previous.close();
        }
        self.active = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, Movie, MovieDetails, Page};
    use crate::tmdb::DiscoverFilters;

    struct EmptyCatalog;

    fn empty_page() -> Page<Movie> {
        Page {
            results: Vec::new(),
            page: 1,
            total_pages: 1,
        }
    }

    #[async_trait::async_trait]
    impl CatalogApi for EmptyCatalog {
        async fn popular(&self, _page: u32) -> anyhow::Result<Page<Movie>> {
            Ok(empty_page())
        }
        async fn search(&self, _query: &str, _page: u32) -> anyhow::Result<Page<Movie>> {
            Ok(empty_page())
        }
        async fn discover(&self, _filters: &DiscoverFilters) -> anyhow::Result<Page<Movie>> {
            Ok(empty_page())
        }
        async fn details(&self, _id: i64) -> anyhow::Result<Option<MovieDetails>> {
            Ok(None)
        }
        async fn genres(&self) -> anyhow::Result<Vec<Genre>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn close_active_unmounts_current_view() {
        let catalog: Arc<dyn CatalogApi> = Arc::new(EmptyCatalog);
        let mut session = Session::default();
        let library = session.library(&catalog);
        assert_eq!(session.active_name(), Some("library"));

        session.close_active();
        assert_eq!(session.active_name(), None);
        assert_eq!(library.mount().await, crate::views::LoadOutcome::Discarded);
        assert!(library.state().await.loading);

        session.close_active();
        assert_eq!(session.active_name(), None);
    }

    #[tokio::test]
    async fn navigating_closes_previous_view() {
        let catalog: Arc<dyn CatalogApi> = Arc::new(EmptyCatalog);
        let mut session = Session::default();
        let home = session.home(&catalog);
        let again = session.home(&catalog);
        home.mount().await;
        assert!(again.is_mounted());

        session.detail(&catalog);
        assert_eq!(session.active_name(), Some("detail"));
        let fresh = session.home(&catalog);
        assert!(!fresh.is_mounted());
    }
}
