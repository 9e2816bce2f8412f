//! The closed set of expense categories.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Expense category.
///
/// Labels are stored verbatim in the database and in closed snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Rent, mortgage, repairs.
    Housing,
    /// Groceries and eating out.
    Food,
    /// Fuel, fares, parking.
    Transportation,
    /// Power, water, internet.
    Utilities,
    /// Medical and pharmacy.
    Healthcare,
    /// Leisure.
    Entertainment,
    /// Tuition, books, courses.
    Education,
    /// Money moved to savings.
    Savings,
    /// General purchases.
    Shopping,
    /// Anything else.
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 10] = [
        Self::Housing,
        Self::Food,
        Self::Transportation,
        Self::Utilities,
        Self::Healthcare,
        Self::Entertainment,
        Self::Education,
        Self::Savings,
        Self::Shopping,
        Self::Other,
    ];

    /// Returns the category label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Entertainment => "Entertainment",
            Self::Education => "Education",
            Self::Savings => "Savings",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    /// Labels are matched exactly; `"food"` is not a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(ValidationError::InvalidCategory)
    }
}
