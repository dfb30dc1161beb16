//! Query the movie catalog directly and print the raw result as pretty JSON.
//! Usage:
//!   cargo run --bin catalog_probe -- popular [page]
//!   cargo run --bin catalog_probe -- search <query>
//!   cargo run --bin catalog_probe -- discover [genre_id|-] [year]
//!   cargo run --bin catalog_probe -- genres
//!   cargo run --bin catalog_probe -- movie <tmdb_id>
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use moviematic::config::Config;
use moviematic::tmdb::{CatalogApi, DiscoverFilters, TmdbClient};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("usage: catalog_probe <popular|search|discover|genres|movie> [args]");
    };

    let config = Config::from_env()?;
    let client = TmdbClient::from_config(&config)?;

    let output = match command.as_str() {
        "popular" => {
            let page = match args.get(1) {
                Some(p) => p.parse().context("page must be a number")?,
                None => 1,
            };
            serde_json::to_value(client.popular(page).await?)?
        }
        "search" => {
            let query = args[1..].join(" ");
            if query.trim().is_empty() {
                bail!("search needs a query");
            }
            serde_json::to_value(client.search(&query, 1).await?)?
        }
        "discover" => {
            let genre = match args.get(1).map(String::as_str) {
                Some("-") | None => None,
                Some(g) => Some(g.parse().context("genre must be a number")?),
            };
            let year = match args.get(2) {
                Some(y) => Some(y.parse().context("year must be a number")?),
                None => None,
            };
            let filters = DiscoverFilters {
                genre,
                year,
                ..DiscoverFilters::default()
            };
            serde_json::to_value(client.discover(&filters).await?)?
        }
        "genres" => serde_json::to_value(client.genres().await?)?,
        "movie" => {
            let id: i64 = args
                .get(1)
                .context("movie needs a tmdb id")?
                .parse()
                .context("tmdb id must be a number")?;
            serde_json::to_value(client.details(id).await?)?
        }
        other => bail!("unknown command '{}'", other),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
