use crate::models::Genre;

const UNKNOWN: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    High,
    Medium,
    Low,
}

impl RatingTier {
    pub fn of(vote_average: f64) -> Self {
        if vote_average >= 7.0 {
            RatingTier::High
        } else if vote_average >= 5.0 {
            RatingTier::Medium
        } else {
            RatingTier::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RatingTier::High => "rating-high",
            RatingTier::Medium => "rating-medium",
            RatingTier::Low => "rating-low",
        }
    }
}

pub fn release_year(date: &str) -> String {
    date.split('-')
        .next()
        .map(str::trim)
        .filter(|y| !y.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn vote(vote_average: f64) -> String {
    format!("{:.1}", vote_average)
}

pub fn runtime(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => UNKNOWN.to_string(),
    }
}

pub fn genre_names(genres: &[Genre]) -> Vec<String> {
    genres.iter().map(|g| g.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_is_first_date_segment() {
        assert_eq!(release_year("1982-06-25"), "1982");
        assert_eq!(release_year(""), "N/A");
    }

    #[test]
    fn runtime_splits_hours() {
        assert_eq!(runtime(Some(117)), "1h 57m");
        assert_eq!(runtime(Some(45)), "0h 45m");
        assert_eq!(runtime(None), "N/A");
        assert_eq!(runtime(Some(0)), "N/A");
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(RatingTier::of(7.0), RatingTier::High);
        assert_eq!(RatingTier::of(6.99), RatingTier::Medium);
        assert_eq!(RatingTier::of(5.0), RatingTier::Medium);
        assert_eq!(RatingTier::of(4.9), RatingTier::Low);
        assert_eq!(vote(7.456), "7.5");
    }
}
