//! Aggregation of the event stream into per-day state.

mod aggregator;
mod day;

pub use aggregator::{Aggregator, DayAggregates};
pub use day::{DayAggregate, KindCounts};
