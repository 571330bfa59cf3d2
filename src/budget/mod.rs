pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{list_all_budgets, list_budgets_by_month, upsert_budget};
