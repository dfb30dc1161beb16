//! Image host URLs for posters and backdrops.

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1485846234645-a62644f84728?q=80&w=2069&auto=format&fit=crop";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W500,
    Original,
}

impl ImageSize {
    fn segment(&self) -> &'static str {
        match self {
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// An image source plus the URL the page swaps in when the source fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub fallback: &'static str,
}

impl ImageRef {
    pub fn resolve(size: ImageSize, path: Option<&str>) -> Self {
        let src = match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) if p.starts_with('/') => format!("{IMAGE_BASE}/{}{p}", size.segment()),
            Some(p) => format!("{IMAGE_BASE}/{}/{p}", size.segment()),
            None => FALLBACK_IMAGE.to_string(),
        };
        Self {
            src,
            fallback: FALLBACK_IMAGE,
        }
    }
}
