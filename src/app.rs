use crate::config::Config;
use crate::models::{build_timeline, Coordinates, TimelineSlot, WeatherSnapshot};
use chrono::{DateTime, Local};

/// State for the city-search overlay. A failed search keeps its error
/// message scoped here so the displayed weather is never disturbed.
pub struct SearchState {
    pub active: bool,
    pub buffer: String,
    pub error: Option<String>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            active: false,
            buffer: String::new(),
            error: None,
        }
    }

    pub fn open(&mut self) {
        self.active = true;
        self.buffer.clear();
        self.error = None;
    }

    pub fn close(&mut self) {
        self.active = false;
        self.buffer.clear();
        self.error = None;
    }

    /// Take the buffer for submission; empty input submits nothing.
    pub fn submit(&mut self) -> Option<String> {
        let query = self.buffer.trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.error = None;
        Some(query)
    }
}

pub struct App {
    pub should_quit: bool,
    pub config: Config,

    // Data - one immutable snapshot per fetch cycle
    pub snapshot: Option<WeatherSnapshot>,
    pub location: Option<Coordinates>,

    // UI state
    pub clock: DateTime<Local>,
    pub loading: bool,
    pub status_message: Option<String>,
    pub search_state: SearchState,
    pub needs_refresh: bool,
    pub pending_search: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            config,
            snapshot: None,
            location: None,
            clock: Local::now(),
            loading: true,
            status_message: None,
            search_state: SearchState::new(),
            needs_refresh: false,
            pending_search: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing weather...");
    }

    /// Re-read the wall clock. Driven by the periodic tick, independent of
    /// data fetching.
    pub fn tick_clock(&mut self) {
        self.clock = Local::now();
    }

    /// Atomically replace the displayed snapshot and the active location.
    pub fn apply_snapshot(&mut self, snapshot: WeatherSnapshot) {
        self.location = Some(snapshot.location);
        self.snapshot = Some(snapshot);
        self.loading = false;
    }

    /// Derive the four-point timeline from the current snapshot and clock.
    /// Recomputed fresh on every render.
    pub fn timeline(&self) -> Vec<TimelineSlot> {
        match self.snapshot {
            Some(ref snapshot) => build_timeline(&snapshot.forecast, self.clock),
            None => Vec::new(),
        }
    }

    pub fn submit_search(&mut self) {
        if let Some(query) = self.search_state.submit() {
            self.pending_search = Some(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, LocationConfig, OpenWeatherMapConfig};
    use crate::models::{CurrentConditions, ForecastEntry};
    use chrono::Utc;

    fn test_config() -> Config {
        Config {
            openweathermap: OpenWeatherMapConfig {
                api_key: "test".to_string(),
            },
            location: LocationConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    fn test_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            fetched_at: Utc::now(),
            location: Coordinates::new(40.7128, -74.006),
            current: CurrentConditions {
                temperature: 21.6,
                humidity: 52,
                pressure_hpa: 1014,
                wind_speed: 3.6,
                feels_like: 21.3,
                temp_max: 23.1,
                temp_min: 19.8,
                condition_code: 800,
                condition_main: "Clear".to_string(),
                condition_description: "clear sky".to_string(),
                place_name: "New York".to_string(),
            },
            forecast: vec![ForecastEntry {
                timestamp: Utc::now(),
                condition_code: 800,
                condition_main: "Clear".to_string(),
                temperature: 20.4,
            }],
        }
    }

    #[test]
    fn new_app_starts_loading_without_data() {
        let app = App::new(test_config());
        assert!(app.loading);
        assert!(app.snapshot.is_none());
        assert!(app.location.is_none());
        assert!(app.timeline().is_empty());
    }

    #[test]
    fn apply_snapshot_replaces_data_and_location() {
        let mut app = App::new(test_config());
        app.apply_snapshot(test_snapshot());

        assert!(!app.loading);
        assert_eq!(
            app.location,
            Some(Coordinates::new(40.7128, -74.006))
        );
        assert_eq!(app.timeline().len(), 1);
    }

    #[test]
    fn search_submit_trims_and_skips_empty() {
        let mut state = SearchState::new();
        state.open();
        state.buffer = "  ".to_string();
        assert_eq!(state.submit(), None);

        state.buffer = " Oslo ".to_string();
        assert_eq!(state.submit(), Some("Oslo".to_string()));
    }

    #[test]
    fn search_open_clears_previous_error() {
        let mut state = SearchState::new();
        state.error = Some("City not found. Please try again.".to_string());
        state.open();
        assert!(state.error.is_none());
        assert!(state.active);
    }

    #[test]
    fn submit_search_queues_a_pending_query() {
        let mut app = App::new(test_config());
        app.search_state.open();
        app.search_state.buffer = "Tokyo".to_string();
        app.submit_search();
        assert_eq!(app.pending_search, Some("Tokyo".to_string()));
    }

    #[test]
    fn request_refresh_sets_flag_and_status() {
        let mut app = App::new(test_config());
        app.request_refresh();
        assert!(app.needs_refresh);
        assert!(app.status_message.is_some());
    }
}
