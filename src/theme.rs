use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Process-wide theme holder shared by every page render.
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    current: Arc<RwLock<Theme>>,
}

impl ThemeContext {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn current(&self) -> Theme {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Flips light/dark and returns the new theme.
    pub fn toggle(&self) -> Theme {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = guard.toggled();
        info!("Theme switched to {}", guard.as_str());
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_is_shared() {
        let ctx = ThemeContext::new(Theme::Light);
        let other = ctx.clone();
        assert_eq!(ctx.toggle(), Theme::Dark);
        assert_eq!(other.current(), Theme::Dark);
        assert_eq!(other.toggle(), Theme::Light);
        assert_eq!(ctx.current(), Theme::Light);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Theme::parse(" DARK "), Some(Theme::Dark));
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
    }
}
