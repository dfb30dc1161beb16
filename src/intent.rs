//! Search precedence for the Home view: free text beats structured filters, which beat
//! the unfiltered popular list.
use chrono::{Datelike, Local};

use crate::tmdb::{DiscoverFilters, SortKey};

pub const EARLIEST_YEAR: i32 = 1900;

/// Raw filter inputs as entered on the Home search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: String,
    pub genre: Option<i64>,
    pub year: Option<i32>,
}

impl SearchFilters {
    /// Builds filters from form fields, where an empty string means "not set".
    pub fn from_form(query: Option<&str>, genre: Option<&str>, year: Option<&str>) -> Self {
        Self {
            query: query.unwrap_or_default().to_string(),
            genre: genre.and_then(|g| g.trim().parse().ok()),
            year: year.and_then(|y| y.trim().parse().ok()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchIntent {
    Search { query: String },
    Discover(DiscoverFilters),
    Popular,
}

pub fn decide(filters: &SearchFilters) -> FetchIntent {
    let query = filters.query.trim();
    if !query.is_empty() {
        return FetchIntent::Search {
            query: query.to_string(),
        };
    }
    if filters.genre.is_some() || filters.year.is_some() {
        return FetchIntent::Discover(DiscoverFilters {
            genre: filters.genre,
            year: filters.year,
            sort: SortKey::PopularityDesc,
            page: 1,
        });
    }
    FetchIntent::Popular
}

/// Years offered by the year filter, newest first, down to 1900 inclusive.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (EARLIEST_YEAR..=current_year).rev().collect()
}

pub fn current_year_options() -> Vec<i32> {
    year_options(Local::now().year())
}
