//! HTML pages for the three views, rendered from view-state snapshots.
use anyhow::{Context, Result};
use askama::Template;
use chrono::{Datelike, Local};

use crate::format::{self, RatingTier};
use crate::images::{ImageRef, ImageSize};
use crate::models::{Movie, MovieDetails};
use crate::theme::Theme;
use crate::views::{DetailState, HomeState, LibraryState, NOT_FOUND, NO_RESULTS};

pub struct Chrome {
    pub theme: &'static str,
    pub toggle_label: &'static str,
    pub year: i32,
}

impl Chrome {
    pub fn new(theme: Theme) -> Self {
        let toggle_label = match theme {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        };
        Self {
            theme: theme.as_str(),
            toggle_label,
            year: Local::now().year(),
        }
    }
}

pub struct Card {
    pub id: i64,
    pub title: String,
    pub year: String,
    pub vote: String,
    pub tier: &'static str,
    pub poster: ImageRef,
}

impl From<&Movie> for Card {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: format::release_year(&movie.release_date),
            vote: format::vote(movie.vote_average),
            tier: RatingTier::of(movie.vote_average).css_class(),
            poster: ImageRef::resolve(ImageSize::W500, movie.poster_path.as_deref()),
        }
    }
}

pub struct GenreOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

pub struct YearOption {
    pub value: i32,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage {
    chrome: Chrome,
    query: String,
    genres: Vec<GenreOption>,
    years: Vec<YearOption>,
    cards: Vec<Card>,
    loading: bool,
    error: String,
    empty: bool,
    empty_message: &'static str,
}

#[derive(Template)]
#[template(path = "library.html")]
struct LibraryPage {
    chrome: Chrome,
    cards: Vec<Card>,
    loading: bool,
    error: String,
    show_load_more: bool,
}

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailPage {
    chrome: Chrome,
    title: String,
    overview: String,
    vote: String,
    year: String,
    runtime: String,
    genres: Vec<String>,
    poster: ImageRef,
    backdrop: ImageRef,
}

#[derive(Template)]
#[template(path = "message.html")]
struct MessagePage {
    chrome: Chrome,
    class: &'static str,
    message: String,
}

pub fn home(state: &HomeState, theme: Theme, years: &[i32]) -> Result<String> {
    let page = HomePage {
        chrome: Chrome::new(theme),
        query: state.filters.query.clone(),
        genres: state
            .genres
            .iter()
            .map(|g| GenreOption {
                id: g.id,
                name: g.name.clone(),
                selected: state.filters.genre == Some(g.id),
            })
            .collect(),
        years: years
            .iter()
            .map(|&value| YearOption {
                value,
                selected: state.filters.year == Some(value),
            })
            .collect(),
        cards: state.movies.iter().map(Card::from).collect(),
        loading: state.loading,
        error: state.error.clone().unwrap_or_default(),
        empty: state.is_empty_result(),
        empty_message: NO_RESULTS,
    };
    page.render().context("rendering home page failed")
}

pub fn library(state: &LibraryState, theme: Theme) -> Result<String> {
    let page = LibraryPage {
        chrome: Chrome::new(theme),
        cards: state.movies.iter().map(Card::from).collect(),
        loading: state.loading,
        error: state.error.clone().unwrap_or_default(),
        show_load_more: state.can_load_more(),
    };
    page.render().context("rendering library page failed")
}

pub fn detail(state: &DetailState, theme: Theme) -> Result<String> {
    match state {
        DetailState::Found(details) => detail_page(details, theme),
        DetailState::Loading => message(theme, "status", "Loading..."),
        DetailState::NotFound => message(theme, "error", NOT_FOUND),
    }
}

fn detail_page(details: &MovieDetails, theme: Theme) -> Result<String> {
    let page = DetailPage {
        chrome: Chrome::new(theme),
        title: details.title.clone(),
        overview: details.overview.clone(),
        vote: format::vote(details.vote_average),
        year: format::release_year(&details.release_date),
        runtime: format::runtime(details.runtime),
        genres: format::genre_names(&details.genres),
        poster: ImageRef::resolve(ImageSize::W500, details.poster_path.as_deref()),
        backdrop: ImageRef::resolve(ImageSize::Original, details.backdrop_path.as_deref()),
    };
    page.render().context("rendering detail page failed")
}

pub fn not_found(theme: Theme) -> Result<String> {
    message(theme, "error", "Page not found")
}

fn message(theme: Theme, class: &'static str, text: &str) -> Result<String> {
    let page = MessagePage {
        chrome: Chrome::new(theme),
        class,
        message: text.to_string(),
    };
    page.render().context("rendering message page failed")
}
