use crate::models::{ForecastEntry, IconCategory};
use chrono::{DateTime, Local, NaiveTime, Timelike};

/// A derived, display-only record for one future hour on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSlot {
    pub label: String,
    pub condition: String,
    pub category: IconCategory,
    pub temperature: i32,
}

/// Sample four future slots, six hours apart, from a 3-hour-interval
/// forecast series. Slots whose stride index falls past the end of the
/// series are omitted rather than padded, so short input yields a short
/// timeline and empty input yields an empty one.
///
/// Every slot's label carries the reference timestamp's minute; only the
/// hour advances. Each label is built as a fresh value per iteration.
pub fn build_timeline(forecast: &[ForecastEntry], reference: DateTime<Local>) -> Vec<TimelineSlot> {
    let reference_hour = reference.hour();
    let reference_minute = reference.minute();

    (0..4)
        .filter_map(|i| {
            let entry = forecast.get(i * 2)?;
            let future_hour = (reference_hour + i as u32 * 6) % 24;

            let label = NaiveTime::from_hms_opt(future_hour, reference_minute, 0)
                .map(|t| t.format("%I:%M %p").to_string())
                .unwrap_or_default();

            Some(TimelineSlot {
                label,
                condition: entry.condition_main.clone(),
                category: IconCategory::classify(entry.condition_code, future_hour),
                temperature: entry.temperature.round() as i32,
            })
        })
        .collect()
}
