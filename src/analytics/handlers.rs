use actix_web::{get, web, HttpResponse};
use chrono::{Datelike, Utc};

use crate::errors::{AppError, ErrorResponse};
use crate::store::RecordStore;

use super::models::{
    BudgetComparisonEntry, CategoryShare, DailyPoint, DashboardResponse, MonthQuery,
    MonthlySeries, MonthlySeriesQuery, SummaryStats,
};
use super::service::AnalyticsService;

/// GET /api/analytics/summary - Totals, utilization and daily average for a month
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = "Analytics",
    params(MonthQuery),
    responses(
        (status = 200, description = "Summary statistics", body = SummaryStats),
        (status = 400, description = "Missing or malformed month", body = ErrorResponse)
    )
)]
#[get("/api/analytics/summary")]
pub async fn get_summary(
    store: web::Data<RecordStore>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    let summary = AnalyticsService::summary(store.get_ref(), query.month()?).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// GET /api/analytics/comparison - Budget versus actual per category
#[utoipa::path(
    get,
    path = "/api/analytics/comparison",
    tag = "Analytics",
    params(MonthQuery),
    responses(
        (status = 200, description = "One entry per budgeted or spent category, by name", body = Vec<BudgetComparisonEntry>),
        (status = 400, description = "Missing or malformed month", body = ErrorResponse)
    )
)]
#[get("/api/analytics/comparison")]
pub async fn get_budget_comparison(
    store: web::Data<RecordStore>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    let comparison = AnalyticsService::budget_comparison(store.get_ref(), query.month()?).await?;

    Ok(HttpResponse::Ok().json(comparison))
}

/// GET /api/analytics/categories - Spend per category with share of total
#[utoipa::path(
    get,
    path = "/api/analytics/categories",
    tag = "Analytics",
    params(MonthQuery),
    responses(
        (status = 200, description = "Category breakdown, largest first", body = Vec<CategoryShare>),
        (status = 400, description = "Missing or malformed month", body = ErrorResponse)
    )
)]
#[get("/api/analytics/categories")]
pub async fn get_category_breakdown(
    store: web::Data<RecordStore>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    let breakdown = AnalyticsService::category_breakdown(store.get_ref(), query.month()?).await?;

    Ok(HttpResponse::Ok().json(breakdown))
}

/// GET /api/analytics/daily - Spend for every day of a month
#[utoipa::path(
    get,
    path = "/api/analytics/daily",
    tag = "Analytics",
    params(MonthQuery),
    responses(
        (status = 200, description = "Dense daily series", body = Vec<DailyPoint>),
        (status = 400, description = "Missing or malformed month", body = ErrorResponse)
    )
)]
#[get("/api/analytics/daily")]
pub async fn get_daily_series(
    store: web::Data<RecordStore>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    let series = AnalyticsService::daily_series(store.get_ref(), query.month()?).await?;

    Ok(HttpResponse::Ok().json(series))
}

/// GET /api/analytics/monthly - Twelve monthly totals
#[utoipa::path(
    get,
    path = "/api/analytics/monthly",
    tag = "Analytics",
    params(MonthlySeriesQuery),
    responses(
        (status = 200, description = "January to December totals", body = MonthlySeries),
        (status = 400, description = "Malformed year or grouping", body = ErrorResponse)
    )
)]
#[get("/api/analytics/monthly")]
pub async fn get_monthly_series(
    store: web::Data<RecordStore>,
    query: web::Query<MonthlySeriesQuery>,
) -> Result<HttpResponse, AppError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    if !(1..=9999).contains(&year) {
        return Err(AppError::ValidationError(
            "Year must be between 1 and 9999".to_string(),
        ));
    }

    let series = AnalyticsService::monthly_series(store.get_ref(), year, query.grouping).await?;

    Ok(HttpResponse::Ok().json(series))
}

/// GET /api/analytics/dashboard - All single-month views from one snapshot
#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    tag = "Analytics",
    params(MonthQuery),
    responses(
        (status = 200, description = "Summary, comparison, breakdown and daily series", body = DashboardResponse),
        (status = 400, description = "Missing or malformed month", body = ErrorResponse)
    )
)]
#[get("/api/analytics/dashboard")]
pub async fn get_dashboard(
    store: web::Data<RecordStore>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    let dashboard = AnalyticsService::dashboard(store.get_ref(), query.month()?).await?;

    Ok(HttpResponse::Ok().json(dashboard))
}
