use tracing::debug;

use super::engine;
use super::models::{
    BudgetComparisonEntry, CategoryShare, DailyPoint, DashboardResponse, MonthlyGrouping,
    MonthlySeries, SummaryStats,
};
use crate::budget::models::Budget;
use crate::errors::AppError;
use crate::month::YearMonth;
use crate::store::RecordStore;
use crate::transaction::models::Transaction;

/// Transactions and budgets read together, so every view derived from them
/// agrees with the others.
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

impl Snapshot {
    /// Load the snapshot for one month, or everything when `month` is `None`.
    pub async fn load(store: &RecordStore, month: Option<YearMonth>) -> Result<Self, AppError> {
        let (transactions, budgets) =
            futures::try_join!(store.list_transactions(month), store.list_budgets(month))?;

        debug!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "Loaded aggregation snapshot"
        );
        Ok(Self {
            transactions,
            budgets,
        })
    }
}

/// Store-facing wrapper around the aggregation engine.
pub struct AnalyticsService;

impl AnalyticsService {
    pub async fn summary(store: &RecordStore, month: YearMonth) -> Result<SummaryStats, AppError> {
        let snapshot = Snapshot::load(store, Some(month)).await?;
        Ok(engine::summary_stats(
            &snapshot.transactions,
            &snapshot.budgets,
            month,
        ))
    }

    pub async fn budget_comparison(
        store: &RecordStore,
        month: YearMonth,
    ) -> Result<Vec<BudgetComparisonEntry>, AppError> {
        let snapshot = Snapshot::load(store, Some(month)).await?;
        Ok(engine::budget_comparison(
            &snapshot.budgets,
            &snapshot.transactions,
            month,
        ))
    }

    pub async fn category_breakdown(
        store: &RecordStore,
        month: YearMonth,
    ) -> Result<Vec<CategoryShare>, AppError> {
        let transactions = store.list_transactions(Some(month)).await?;
        Ok(engine::category_breakdown(&transactions))
    }

    pub async fn daily_series(
        store: &RecordStore,
        month: YearMonth,
    ) -> Result<Vec<DailyPoint>, AppError> {
        let transactions = store.list_transactions(Some(month)).await?;
        Ok(engine::daily_series(&transactions, month))
    }

    pub async fn monthly_series(
        store: &RecordStore,
        year: i32,
        grouping: MonthlyGrouping,
    ) -> Result<MonthlySeries, AppError> {
        let transactions = store.list_transactions(None).await?;
        Ok(match grouping {
            MonthlyGrouping::Calendar => engine::monthly_series(&transactions, year),
            MonthlyGrouping::Year => engine::monthly_series_for_year(&transactions, year),
        })
    }

    /// Every single-month view from one snapshot.
    pub async fn dashboard(
        store: &RecordStore,
        month: YearMonth,
    ) -> Result<DashboardResponse, AppError> {
        let snapshot = Snapshot::load(store, Some(month)).await?;
        let transactions = &snapshot.transactions;

        Ok(DashboardResponse {
            month,
            label: month.long_label(),
            summary: engine::summary_stats(transactions, &snapshot.budgets, month),
            comparison: engine::budget_comparison(&snapshot.budgets, transactions, month),
            categories: engine::category_breakdown(transactions),
            daily: engine::daily_series(transactions, month),
        })
    }
}
