use actix_web::{get, post, web, HttpResponse};

use crate::errors::{AppError, ErrorResponse};
use crate::month::YearMonth;
use crate::store::RecordStore;

use super::models::{BudgetMonthPath, BudgetResponse, UpsertBudgetDto};
use super::service::BudgetService;

/// GET /api/budgets - List every budget across all months
#[utoipa::path(
    get,
    path = "/api/budgets",
    tag = "Budgets",
    responses(
        (status = 200, description = "All budgets", body = Vec<BudgetResponse>),
        (status = 503, description = "Record store unavailable", body = ErrorResponse)
    )
)]
#[get("/api/budgets")]
pub async fn list_all_budgets(store: web::Data<RecordStore>) -> Result<HttpResponse, AppError> {
    let budgets = BudgetService::list_all(store.get_ref()).await?;

    let response: Vec<BudgetResponse> = budgets.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/budgets/{month} - List budgets for one month
#[utoipa::path(
    get,
    path = "/api/budgets/{month}",
    tag = "Budgets",
    params(BudgetMonthPath),
    responses(
        (status = 200, description = "Budgets for the month", body = Vec<BudgetResponse>),
        (status = 400, description = "Malformed month", body = ErrorResponse)
    )
)]
#[get("/api/budgets/{month}")]
pub async fn list_budgets_by_month(
    store: web::Data<RecordStore>,
    path: web::Path<BudgetMonthPath>,
) -> Result<HttpResponse, AppError> {
    let month: YearMonth = path.month.parse()?;
    let budgets = BudgetService::list_by_month(store.get_ref(), month).await?;

    let response: Vec<BudgetResponse> = budgets.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/budgets - Create or replace the budget of a category in a month
#[utoipa::path(
    post,
    path = "/api/budgets",
    tag = "Budgets",
    request_body = UpsertBudgetDto,
    responses(
        (status = 200, description = "Budget upserted", body = BudgetResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
#[post("/api/budgets")]
pub async fn upsert_budget(
    store: web::Data<RecordStore>,
    body: web::Json<UpsertBudgetDto>,
) -> Result<HttpResponse, AppError> {
    let budget = BudgetService::upsert(store.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(BudgetResponse::from(budget)))
}
