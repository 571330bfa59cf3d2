use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::category::Category;
use crate::errors::AppError;
use crate::month::YearMonth;

/// Budgeted versus actual spend for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparisonEntry {
    pub category: Category,
    /// 0 when the category has no budget for the month
    #[schema(example = 1000.00)]
    pub budgeted: Decimal,
    /// 0 when nothing was spent in the category
    #[schema(example = 500.00)]
    pub actual: Decimal,
    /// budgeted - actual, negative when over budget
    #[schema(example = 500.00)]
    pub remaining: Decimal,
    /// actual / budgeted * 100, or 0 without a budget
    #[schema(example = 50.00)]
    pub utilization_pct: Decimal,
}

/// A category's spend and its share of the total
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: Category,
    #[schema(example = 500.00)]
    pub total: Decimal,
    #[schema(example = 29.41)]
    pub share_pct: Decimal,
}

/// Spend on one day of a month
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyPoint {
    /// Day of month, 1-based
    #[schema(example = 3)]
    pub day: u32,
    #[schema(example = 500.00)]
    pub total: Decimal,
}

/// Spend in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Month number, 1-based
    #[schema(example = 7)]
    pub month: u32,
    #[schema(example = "Jul")]
    pub label: String,
    pub total: Decimal,
}

/// How transactions are bucketed into the twelve months of a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyGrouping {
    /// By month of year only; transactions from every year share a bucket
    #[default]
    Calendar,
    /// By year and month; only the requested year counts
    Year,
}

/// Twelve monthly totals, January through December
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlySeries {
    #[schema(example = 2025)]
    pub year: i32,
    pub grouping: MonthlyGrouping,
    pub points: Vec<MonthlyPoint>,
}

/// Headline numbers for one month
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    #[schema(value_type = String, example = "2025-07")]
    pub month: YearMonth,
    #[schema(example = 1700.00)]
    pub total_actual: Decimal,
    #[schema(example = 1000.00)]
    pub total_budgeted: Decimal,
    /// total_budgeted - total_actual
    pub remaining: Decimal,
    /// total_actual / total_budgeted * 100, or 0 without budgets
    #[schema(example = 170.00)]
    pub utilization_pct: Decimal,
    /// total_actual spread over every day of the month
    #[schema(example = 54.84)]
    pub avg_daily: Decimal,
    #[schema(example = 31)]
    pub days_in_month: u32,
    #[schema(example = 2)]
    pub transaction_count: usize,
}

/// Every single-month view, computed from one snapshot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[schema(value_type = String, example = "2025-07")]
    pub month: YearMonth,
    #[schema(example = "July 2025")]
    pub label: String,
    pub summary: SummaryStats,
    pub comparison: Vec<BudgetComparisonEntry>,
    pub categories: Vec<CategoryShare>,
    pub daily: Vec<DailyPoint>,
}

/// Query parameters selecting a month
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    /// Month key (YYYY-MM)
    #[param(example = "2025-07")]
    pub month: String,
}

impl MonthQuery {
    pub fn month(&self) -> Result<YearMonth, AppError> {
        self.month.parse()
    }
}

/// Query parameters for the twelve-month series
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlySeriesQuery {
    /// Reference year (defaults to the current year)
    #[param(example = 2025)]
    pub year: Option<i32>,
    /// `calendar` (default) or `year`
    #[serde(default)]
    pub grouping: MonthlyGrouping,
}
