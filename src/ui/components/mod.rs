pub mod input;
pub mod metric;

pub use input::InputWidget;
pub use metric::{MetricCell, TimelineCell};
