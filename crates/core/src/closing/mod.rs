//! Month lifecycle: open months are editable, closed months are frozen.
//!
//! A month is closed iff a snapshot exists for (user, month). The transition
//! is one-way; there is no path back to open.

pub mod service;
pub mod types;

pub use service::ClosingService;
pub use types::{MonthState, MonthlySnapshot, SnapshotDraft};
