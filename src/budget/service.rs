use tracing::info;

use super::models::{Budget, UpsertBudgetDto};
use crate::errors::AppError;
use crate::month::YearMonth;
use crate::store::RecordStore;

/// Repository operations over budget records.
pub struct BudgetService;

impl BudgetService {
    /// All budgets for one month.
    pub async fn list_by_month(
        store: &RecordStore,
        month: YearMonth,
    ) -> Result<Vec<Budget>, AppError> {
        store.list_budgets(Some(month)).await
    }

    /// The full budget table, for cross-month views.
    pub async fn list_all(store: &RecordStore) -> Result<Vec<Budget>, AppError> {
        store.list_budgets(None).await
    }

    /// Create the budget for `(month, category)` or replace its amount.
    /// Repeating the call with the same input leaves exactly one record.
    pub async fn upsert(store: &RecordStore, dto: UpsertBudgetDto) -> Result<Budget, AppError> {
        let new = dto.into_new()?;
        let budget = store.upsert_budget(new).await?;

        info!(
            id = %budget.id,
            month = %budget.month,
            category = %budget.category,
            amount = %budget.amount,
            "Upserted budget"
        );
        Ok(budget)
    }
}
