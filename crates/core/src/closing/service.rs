//! Closing rules.

use tally_shared::types::{Currency, format_amount};

use super::types::{MonthState, MonthlySnapshot, SnapshotDraft};
use crate::aggregation::{MonthAggregator, MonthStats};
use crate::error::LedgerError;
use crate::expense::ExpenseRecord;
use crate::month::MonthKey;

/// Closing service for business logic.
pub struct ClosingService;

impl ClosingService {
    /// State of a month given its stored snapshot, if any.
    #[must_use]
    pub fn state(snapshot: Option<&MonthlySnapshot>) -> MonthState {
        match snapshot {
            Some(s) if s.is_closed => MonthState::Closed,
            _ => MonthState::Open,
        }
    }

    /// Fails if `month` is closed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MonthClosed` when `state` is [`MonthState::Closed`].
    pub fn ensure_editable(month: MonthKey, state: MonthState) -> Result<(), LedgerError> {
        if state.is_editable() {
            Ok(())
        } else {
            Err(LedgerError::MonthClosed(month))
        }
    }

    /// Builds the snapshot for `month` from its expenses.
    ///
    /// `expenses` must already be limited to the month.
    #[must_use]
    pub fn prepare(month: MonthKey, expenses: &[ExpenseRecord], currency: Currency) -> SnapshotDraft {
        let stats = MonthAggregator::aggregate(expenses);
        let summary_text = Self::summary_text(month, &stats, currency);

        SnapshotDraft {
            month,
            stats,
            summary_text,
        }
    }

    /// One-line description stored with the snapshot.
    #[must_use]
    pub fn summary_text(month: MonthKey, stats: &MonthStats, currency: Currency) -> String {
        if stats.transaction_count == 0 {
            return format!("Closed {month} with no transactions.");
        }

        format!(
            "Closed {month} with {} transactions and {} total spend.",
            stats.transaction_count,
            format_amount(stats.total_amount, currency)
        )
    }
}
