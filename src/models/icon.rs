use serde::{Deserialize, Serialize};

/// Display category derived from an OpenWeatherMap condition code and the
/// local hour. Clear and cloudy skies carry day/night variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconCategory {
    Thunderstorm,
    Rain,
    Fog,
    ClearDay,
    ClearNight,
    CloudyDay,
    CloudyNight,
}

/// Night runs from 6 PM up to (but not including) 6 AM.
pub fn is_night(hour: u32) -> bool {
    hour >= 18 || hour < 6
}

impl IconCategory {
    /// Map a condition code plus hour-of-day to a display category.
    ///
    /// Total over all integers: codes outside the provider taxonomy fall
    /// through to the cloudy variant rather than erroring.
    pub fn classify(condition_code: i32, hour: u32) -> Self {
        let night = is_night(hour);

        match condition_code {
            200..=232 => IconCategory::Thunderstorm,
            300..=531 => IconCategory::Rain,
            701..=781 => IconCategory::Fog,
            800 if night => IconCategory::ClearNight,
            800 => IconCategory::ClearDay,
            _ if night => IconCategory::CloudyNight,
            _ => IconCategory::CloudyDay,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Thunderstorm => "Thunderstorm",
            IconCategory::Rain => "Rain",
            IconCategory::Fog => "Fog",
            IconCategory::ClearDay => "Clear",
            IconCategory::ClearNight => "Clear Night",
            IconCategory::CloudyDay => "Cloudy",
            IconCategory::CloudyNight => "Cloudy Night",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            IconCategory::Thunderstorm => "⛈",
            IconCategory::Rain => "🌧",
            IconCategory::Fog => "🌫",
            IconCategory::ClearDay => "☀",
            IconCategory::ClearNight => "🌙",
            IconCategory::CloudyDay => "⛅",
            IconCategory::CloudyNight => "☁",
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_taxonomy_ranges() {
        assert_eq!(
            IconCategory::classify(200, 12),
            IconCategory::Thunderstorm
        );
        assert_eq!(
            IconCategory::classify(232, 12),
            IconCategory::Thunderstorm
        );
        assert_eq!(IconCategory::classify(300, 12), IconCategory::Rain);
        assert_eq!(IconCategory::classify(500, 12), IconCategory::Rain);
        assert_eq!(IconCategory::classify(531, 12), IconCategory::Rain);
        assert_eq!(IconCategory::classify(701, 12), IconCategory::Fog);
        assert_eq!(IconCategory::classify(781, 12), IconCategory::Fog);
        assert_eq!(IconCategory::classify(800, 12), IconCategory::ClearDay);
        assert_eq!(IconCategory::classify(801, 12), IconCategory::CloudyDay);
        assert_eq!(IconCategory::classify(804, 12), IconCategory::CloudyDay);
    }

    #[test]
    fn classify_boundary_above_thunderstorm() {
        // 233 sits between ranges and lands in the 300..=531 span.
        assert_eq!(IconCategory::classify(233, 12), IconCategory::Rain);
    }

    #[test]
    fn classify_day_night_boundary() {
        assert_eq!(IconCategory::classify(800, 17), IconCategory::ClearDay);
        assert_eq!(IconCategory::classify(800, 18), IconCategory::ClearNight);
        assert_eq!(IconCategory::classify(800, 5), IconCategory::ClearNight);
        assert_eq!(IconCategory::classify(800, 6), IconCategory::ClearDay);
        assert_eq!(IconCategory::classify(801, 23), IconCategory::CloudyNight);
        assert_eq!(IconCategory::classify(801, 0), IconCategory::CloudyNight);
    }

    #[test]
    fn classify_fallback_for_unknown_codes() {
        assert_eq!(IconCategory::classify(999, 12), IconCategory::CloudyDay);
        assert_eq!(IconCategory::classify(999, 22), IconCategory::CloudyNight);
        assert_eq!(IconCategory::classify(0, 12), IconCategory::CloudyDay);
        assert_eq!(IconCategory::classify(-7, 12), IconCategory::CloudyDay);
        assert_eq!(IconCategory::classify(600, 12), IconCategory::CloudyDay);
    }

    #[test]
    fn classify_is_total_over_every_hour() {
        for hour in 0..24 {
            for code in [-100, 0, 199, 232, 233, 532, 700, 782, 800, 805, 1000] {
                let _ = IconCategory::classify(code, hour);
            }
        }
    }
}
