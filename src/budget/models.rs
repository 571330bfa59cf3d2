use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::category::models::{validate_category, Category};
use crate::errors::AppError;
use crate::month::{validate_month_key, YearMonth};
use crate::transaction::models::MAX_AMOUNT;

/// Validate that a Decimal is non-negative and at most [`MAX_AMOUNT`]
fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("must be non-negative")
            .with_message("Amount must be non-negative".into()));
    }
    if *value > MAX_AMOUNT {
        return Err(ValidationError::new("amount_too_large")
            .with_message("Amount cannot exceed 1000000000000".into()));
    }
    Ok(())
}

/// A spending ceiling for one category in one month.
/// At most one exists per `(month, category)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub month: YearMonth,
    pub category: Category,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated upsert payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub month: YearMonth,
    pub category: Category,
    pub amount: Decimal,
}

/// Budget information returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    /// Unique budget identifier (stable across upserts)
    pub id: Uuid,
    /// Month key
    #[schema(value_type = String, example = "2025-07")]
    pub month: YearMonth,
    /// Spending category
    pub category: Category,
    /// Budgeted amount for the month
    #[schema(example = 1000.00)]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Budget> for BudgetResponse {
    fn from(b: Budget) -> Self {
        Self {
            id: b.id,
            month: b.month,
            category: b.category,
            amount: b.amount,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// DTO for creating or replacing the budget of a category in a month
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBudgetDto {
    #[validate(custom(function = "validate_month_key", message = "Month must be in YYYY-MM format"))]
    #[schema(example = "2025-07")]
    pub month: String,

    #[validate(custom(function = "validate_category", message = "Unknown category"))]
    #[schema(example = "Food")]
    pub category: String,

    /// Use 0 to clear a budget
    #[validate(custom(function = "validate_non_negative"))]
    #[schema(value_type = f64, example = 1000.00)]
    pub amount: Decimal,
}

impl UpsertBudgetDto {
    pub fn into_new(self) -> Result<NewBudget, AppError> {
        self.validate()?;

        Ok(NewBudget {
            month: self.month.parse()?,
            category: self.category.parse()?,
            amount: self.amount,
        })
    }
}

/// Path parameters for month lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct BudgetMonthPath {
    /// Month key (YYYY-MM)
    #[param(example = "2025-07")]
    pub month: String,
}
