//! Month totals and per-category breakdowns.

pub mod service;


pub use service::{MonthAggregator, MonthStats, TOP_CATEGORY_NONE};
