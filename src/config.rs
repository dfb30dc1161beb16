use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::theme::Theme;
use crate::tmdb::TMDB_BASE;

const DEFAULT_ADDR: &str = "127.0.0.1:3146";

#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_key: String,
    pub tmdb_api_base: String,
    pub addr: SocketAddr,
    pub theme: Theme,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let tmdb_api_key = match lookup("TMDB_API_KEY").filter(|k| !k.is_empty()) {
            Some(key) => {
                info!("TMDB_API_KEY is set");
                key
            }
            None => {
                warn!("TMDB_API_KEY is not set - catalog requests will be rejected");
                String::new()
            }
        };
        let tmdb_api_base = lookup("TMDB_API_BASE")
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| TMDB_BASE.to_string());
        let addr_raw = lookup("MOVIEMATIC_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse()
            .with_context(|| format!("MOVIEMATIC_ADDR is not a socket address: {addr_raw}"))?;
        let theme = match lookup("MOVIEMATIC_THEME") {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!("Unknown MOVIEMATIC_THEME '{}', using light", raw);
                Theme::default()
            }),
            None => Theme::default(),
        };
        Ok(Self {
            tmdb_api_key,
            tmdb_api_base,
            addr,
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.tmdb_api_key, "");
        assert_eq!(config.tmdb_api_base, TMDB_BASE);
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_API_BASE", "http://127.0.0.1:9000/3"),
            ("MOVIEMATIC_ADDR", "0.0.0.0:8080"),
            ("MOVIEMATIC_THEME", "Dark"),
        ]))
        .unwrap();
        assert_eq!(config.tmdb_api_key, "abc");
        assert_eq!(config.tmdb_api_base, "http://127.0.0.1:9000/3");
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn rejects_bad_address() {
        assert!(Config::from_lookup(lookup(&[("MOVIEMATIC_ADDR", "nope")])).is_err());
    }
}
