//! Expense input as submitted by callers, and its validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tally_shared::types::round_money;

use super::category::Category;
use crate::error::ValidationError;
use crate::month::MonthKey;

/// Largest amount accepted for a single expense.
pub const MAX_EXPENSE_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum characters in expense notes.
pub const MAX_EXPENSE_NOTES: usize = 280;

/// A numeric field that may arrive as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A well-formed decimal (number or numeric string).
    Number(Decimal),
    /// Any other string; parsed leniently after trimming.
    Text(String),
}

impl AmountInput {
    /// Returns the decimal value, or `None` when the text is not a number.
    ///
    /// Blank text counts as absent.
    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Returns true for an empty or whitespace-only string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

/// Unvalidated expense fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    /// Short description.
    #[serde(default)]
    pub title: Option<String>,
    /// Spent amount.
    #[serde(default)]
    pub amount: Option<AmountInput>,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Optional free text.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated expense, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    /// Trimmed title, 2..=80 characters.
    pub title: String,
    /// Positive amount rounded to 2 decimal places.
    pub amount: Decimal,
    /// Category.
    pub category: Category,
    /// Calendar date.
    pub date: NaiveDate,
    /// Trimmed notes, empty when absent.
    pub notes: String,
}

impl ExpenseDraft {
    /// The month this expense is booked into.
    #[must_use]
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

impl ExpenseInput {
    /// Validates the input, checking fields in a fixed order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<ExpenseDraft, ValidationError> {
        let title = self.title.as_deref().unwrap_or_default().trim();
        let title_len = title.chars().count();
        if !(2..=80).contains(&title_len) {
            return Err(ValidationError::InvalidTitle);
        }

        let amount = self
            .amount
            .as_ref()
            .and_then(AmountInput::value)
            .filter(|value| *value > Decimal::ZERO && *value <= MAX_EXPENSE_AMOUNT)
            .map(round_money)
            .filter(|value| *value > Decimal::ZERO)
            .ok_or(ValidationError::InvalidAmount)?;

        let category: Category = self.category.as_deref().unwrap_or_default().parse()?;

        let date = parse_date(self.date.as_deref().unwrap_or_default())?;

        let notes = self.notes.as_deref().unwrap_or_default().trim();
        if notes.chars().count() > MAX_EXPENSE_NOTES {
            return Err(ValidationError::ExpenseNotesTooLong);
        }

        Ok(ExpenseDraft {
            title: title.to_string(),
            amount,
            category,
            date,
            notes: notes.to_string(),
        })
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDate` for any other shape or an impossible date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(ValidationError::InvalidDate);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn valid_input() -> ExpenseInput {
        ExpenseInput {
            title: Some("Groceries".to_string()),
            amount: Some(dec!(42.5).into()),
            category: Some("Food".to_string()),
            date: Some("2025-01-15".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_valid_input_is_normalised() {
        let mut input = valid_input();
        input.title = Some("  Groceries  ".to_string());
        input.notes = Some("  weekly run ".to_string());

        let draft = input.validate().unwrap();

        assert_eq!(draft.title, "Groceries");
        assert_eq!(draft.amount.to_string(), "42.50");
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(draft.notes, "weekly run");
        assert_eq!(draft.month().to_string(), "2025-01");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("A"))]
    #[case(Some("   "))]
    #[case(Some(" x "))]
    fn test_title_too_short(#[case] title: Option<&str>) {
        let mut input = valid_input();
        input.title = title.map(str::to_string);
        assert_eq!(input.validate(), Err(ValidationError::InvalidTitle));
    }

    #[test]
    fn test_title_too_long() {
        let mut input = valid_input();
        input.title = Some("x".repeat(81));
        assert_eq!(input.validate(), Err(ValidationError::InvalidTitle));

        input.title = Some("x".repeat(80));
        assert!(input.validate().is_ok());
    }

    #[rstest]
    #[case(Some(AmountInput::Number(dec!(0))))]
    #[case(Some(AmountInput::Number(dec!(-5))))]
    #[case(Some(AmountInput::Number(dec!(1000000.01))))]
    #[case(Some(AmountInput::Number(dec!(0.001))))]
    #[case(Some(AmountInput::Text("abc".to_string())))]
    #[case(Some(AmountInput::Text(String::new())))]
    #[case(None)]
    fn test_invalid_amount(#[case] amount: Option<AmountInput>) {
        let mut input = valid_input();
        input.amount = amount;
        assert_eq!(input.validate(), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn test_amount_from_text_is_rounded() {
        let mut input = valid_input();
        input.amount = Some(AmountInput::Text(" 19.995 ".to_string()));
        assert_eq!(input.validate().unwrap().amount, dec!(20.00));

        input.amount = Some(AmountInput::Number(dec!(1000000)));
        assert_eq!(input.validate().unwrap().amount, dec!(1000000.00));
    }

    #[test]
    fn test_invalid_category() {
        let mut input = valid_input();
        input.category = Some("Groceries".to_string());
        assert_eq!(input.validate(), Err(ValidationError::InvalidCategory));
    }

    #[rstest]
    #[case("2025-1-15")]
    #[case("2025-02-30")]
    #[case("15-01-2025")]
    #[case("2025-01-15T00:00:00")]
    #[case("")]
    fn test_invalid_date(#[case] date: &str) {
        let mut input = valid_input();
        input.date = Some(date.to_string());
        assert_eq!(input.validate(), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_notes_limit() {
        let mut input = valid_input();
        input.notes = Some("n".repeat(281));
        assert_eq!(input.validate(), Err(ValidationError::ExpenseNotesTooLong));

        input.notes = Some(format!("  {}  ", "n".repeat(280)));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_amount_deserialises_from_number_or_string() {
        let input: ExpenseInput =
            serde_json::from_str(r#"{"title":"Bus","amount":"12.30","category":"Transportation","date":"2025-01-02"}"#)
                .unwrap();
        assert_eq!(input.validate().unwrap().amount, dec!(12.30));

        let input: ExpenseInput =
            serde_json::from_str(r#"{"title":"Bus","amount":12.3,"category":"Transportation","date":"2025-01-02"}"#)
                .unwrap();
        assert_eq!(input.validate().unwrap().amount, dec!(12.30));

        let input: ExpenseInput =
            serde_json::from_str(r#"{"title":"Bus","amount":"twelve","category":"Transportation","date":"2025-01-02"}"#)
                .unwrap();
        assert_eq!(input.validate(), Err(ValidationError::InvalidAmount));
    }
}
