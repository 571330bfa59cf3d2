use utoipa::OpenApi;

use crate::analytics::models::{
    BudgetComparisonEntry, CategoryShare, DailyPoint, DashboardResponse, MonthlyGrouping,
    MonthlyPoint, MonthlySeries, SummaryStats,
};
use crate::budget::models::{BudgetResponse, UpsertBudgetDto};
use crate::category::models::{CategoriesResponse, Category};
use crate::errors::ErrorResponse;
use crate::health::HealthResponse;
use crate::transaction::models::{TransactionDraft, TransactionResponse};

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Budget Tracker API",
        version = "1.0.0",
        description = "Record spending, set monthly category budgets and chart the results",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:4000", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Categories", description = "The closed set of spending categories"),
        (name = "Transactions", description = "Individual spending records"),
        (name = "Budgets", description = "Monthly spending limits per category"),
        (name = "Analytics", description = "Aggregated views for dashboards and charts")
    ),
    paths(
        crate::health::health_check,
        crate::category::handlers::list_categories,
        // Transaction endpoints
        crate::transaction::handlers::list_transactions,
        crate::transaction::handlers::get_transaction,
        crate::transaction::handlers::create_transaction,
        crate::transaction::handlers::update_transaction,
        crate::transaction::handlers::delete_transaction,
        // Budget endpoints
        crate::budget::handlers::list_all_budgets,
        crate::budget::handlers::list_budgets_by_month,
        crate::budget::handlers::upsert_budget,
        // Analytics endpoints
        crate::analytics::handlers::get_summary,
        crate::analytics::handlers::get_budget_comparison,
        crate::analytics::handlers::get_category_breakdown,
        crate::analytics::handlers::get_daily_series,
        crate::analytics::handlers::get_monthly_series,
        crate::analytics::handlers::get_dashboard,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            Category,
            CategoriesResponse,
            TransactionResponse,
            TransactionDraft,
            BudgetResponse,
            UpsertBudgetDto,
            BudgetComparisonEntry,
            CategoryShare,
            DailyPoint,
            MonthlyGrouping,
            MonthlyPoint,
            MonthlySeries,
            SummaryStats,
            DashboardResponse,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/health",
            "/api/categories",
            "/api/transactions",
            "/api/transactions/{id}",
            "/api/budgets",
            "/api/budgets/{month}",
            "/api/analytics/summary",
            "/api/analytics/monthly",
            "/api/analytics/dashboard",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
