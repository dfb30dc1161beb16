use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::models::{Genre, Movie, MovieDetails, Page};

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base: String,
}

/// Read-only access to the remote movie catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn popular(&self, page: u32) -> Result<Page<Movie>>;
    async fn search(&self, query: &str, page: u32) -> Result<Page<Movie>>;
    async fn discover(&self, filters: &DiscoverFilters) -> Result<Page<Movie>>;
    /// `Ok(None)` when the service answered with an empty or `null` body.
    async fn details(&self, id: i64) -> Result<Option<MovieDetails>>;
    async fn genres(&self) -> Result<Vec<Genre>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    PopularityDesc,
    TitleAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::TitleAsc => "title.asc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverFilters {
    pub genre: Option<i64>,
    pub year: Option<i32>,
    pub sort: SortKey,
    pub page: u32,
}

impl Default for DiscoverFilters {
    fn default() -> Self {
        Self {
            genre: None,
            year: None,
            sort: SortKey::default(),
            page: 1,
        }
    }
}

impl DiscoverFilters {
    pub fn alphabetical(page: u32) -> Self {
        Self {
            sort: SortKey::TitleAsc,
            page,
            ..Self::default()
        }
    }
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, base: impl Into<String>) -> Result<Self> {
        let user_agent = format!("moviematic/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.tmdb_api_key.clone(), config.tmdb_api_base.clone())
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}{path}?api_key={}",
            self.base,
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!(url = %redact(url), "GET");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}: {}", redact(url), status, text));
        }
        Ok(text)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let text = self.get_text(url).await?;
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn popular(&self, page: u32) -> Result<Page<Movie>> {
        let url = self.url("/movie/popular", &[("page", page.to_string())]);
        self.get_json(&url).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Page<Movie>> {
        let url = self.url(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        );
        self.get_json(&url).await
    }

    async fn discover(&self, filters: &DiscoverFilters) -> Result<Page<Movie>> {
        let mut params = Vec::with_capacity(4);
        if let Some(genre) = filters.genre {
            params.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = filters.year {
            params.push(("primary_release_year", year.to_string()));
        }
        params.push(("sort_by", filters.sort.as_str().to_string()));
        params.push(("page", filters.page.to_string()));
        let url = self.url("/discover/movie", &params);
        self.get_json(&url).await
    }

    async fn details(&self, id: i64) -> Result<Option<MovieDetails>> {
        let url = self.url(&format!("/movie/{id}"), &[]);
        let text = self.get_text(&url).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        let parsed: Option<MovieDetails> =
            serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        #[derive(Deserialize)]
        struct GenreList {
            #[serde(default)]
            genres: Vec<Genre>,
        }

        let url = self.url("/genre/movie/list", &[]);
        let data: GenreList = self.get_json(&url).await?;
        Ok(data.genres)
    }
}

/// Strips the credential from a request URL before it reaches logs or error chains.
fn redact(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let value_start = start + "api_key=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
