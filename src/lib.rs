pub mod analytics;
pub mod budget;
pub mod category;
pub mod config;
pub mod errors;
pub mod health;
pub mod month;
pub mod openapi;
pub mod store;
pub mod transaction;

use actix_web::{error, web};

use crate::errors::AppError;

/// Register every route and extractor config on an application.
///
/// Shared by the server binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::ValidationError(err.to_string()))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::ValidationError(err.to_string()))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::ValidationError(err.to_string()))
    }))
    .service(health::index)
    .service(health::health_check)
    .service(category::list_categories)
    // Transaction endpoints
    .service(transaction::list_transactions)
    .service(transaction::create_transaction)
    .service(transaction::get_transaction)
    .service(transaction::update_transaction)
    .service(transaction::delete_transaction)
    // Budget endpoints (order matters: collection routes before {month})
    .service(budget::list_all_budgets)
    .service(budget::upsert_budget)
    .service(budget::list_budgets_by_month)
    // Analytics endpoints
    .service(analytics::get_summary)
    .service(analytics::get_budget_comparison)
    .service(analytics::get_category_breakdown)
    .service(analytics::get_daily_series)
    .service(analytics::get_monthly_series)
    .service(analytics::get_dashboard);
}
