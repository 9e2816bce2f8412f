//! Read models that blend closed snapshots with live data.
//!
//! - Monthly summaries (history, newest first)
//! - Trend points (fixed window, oldest first)
//! - Monthly detail (everything needed to render one month)

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
