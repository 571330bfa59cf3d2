use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::category::models::{validate_category, Category};
use crate::errors::AppError;
use crate::month::YearMonth;

/// Largest amount a transaction or budget may carry. Keeps every aggregate
/// well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Validate that amount is positive and at most [`MAX_AMOUNT`]
fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount_must_be_positive")
            .with_message("Amount must be positive".into()));
    }
    if *amount > MAX_AMOUNT {
        return Err(ValidationError::new("amount_too_large")
            .with_message("Amount cannot exceed 1000000000000".into()));
    }
    Ok(())
}

/// Validate that a text field has at least one non-whitespace character
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_transaction_date(value: &str) -> Result<(), ValidationError> {
    match parse_transaction_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("invalid_date")),
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Timestamps keep the calendar
/// date as written; the time of day is dropped.
pub fn parse_transaction_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// A stored expense record
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field values for a create or full replace
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub category: Category,
}

/// Transaction information returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Unique transaction identifier
    pub id: Uuid,
    /// Transaction amount (always positive)
    #[schema(example = 500.00)]
    pub amount: Decimal,
    /// What the money was spent on
    #[schema(example = "Weekly groceries")]
    pub description: String,
    /// Calendar date of the expense
    #[schema(value_type = String, example = "2025-07-03")]
    pub date: NaiveDate,
    /// Spending category
    pub category: Category,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            amount: t.amount,
            description: t.description,
            date: t.date,
            category: t.category,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Request body for creating or replacing a transaction
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    /// Transaction amount (must be positive, at most 1000000000000)
    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(value_type = f64, example = 500.00)]
    pub amount: Decimal,

    /// Description (required, max 500 chars)
    #[validate(
        custom(function = "validate_not_blank", message = "Description is required"),
        length(max = 500, message = "Description cannot exceed 500 characters")
    )]
    #[schema(example = "Weekly groceries")]
    pub description: String,

    /// Date as YYYY-MM-DD or an RFC 3339 timestamp
    #[validate(custom(
        function = "validate_transaction_date",
        message = "Date must be YYYY-MM-DD or an RFC 3339 timestamp"
    ))]
    #[schema(example = "2025-07-03")]
    pub date: String,

    /// One of Food, Bills, Transport, Shopping, Entertainment, Travel, Other
    #[validate(custom(function = "validate_category", message = "Unknown category"))]
    #[schema(example = "Food")]
    pub category: String,
}

impl TransactionDraft {
    /// Validate every field and convert into a storable record.
    pub fn into_new(self) -> Result<NewTransaction, AppError> {
        self.validate()?;

        let date = parse_transaction_date(&self.date).ok_or_else(|| {
            AppError::ValidationError(format!("date: invalid date '{}'", self.date))
        })?;
        let category = self.category.parse::<Category>()?;

        Ok(NewTransaction {
            amount: self.amount,
            description: self.description.trim().to_string(),
            date,
            category,
        })
    }
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTransactionsQuery {
    /// Only return transactions dated in this month (YYYY-MM)
    #[param(example = "2025-07")]
    pub month: Option<String>,
}

impl ListTransactionsQuery {
    pub fn month(&self) -> Result<Option<YearMonth>, AppError> {
        self.month.as_deref().map(str::parse).transpose()
    }
}

/// Path parameters for transaction ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionIdPath {
    /// Transaction identifier
    pub id: String,
}
