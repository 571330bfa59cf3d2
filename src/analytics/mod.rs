//! Budget-vs-actual aggregation.
//!
//! [`engine`] holds the pure reductions over transaction and budget snapshots;
//! [`service`] loads a snapshot from the record store and feeds it through them.

pub mod engine;
pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{
    get_budget_comparison, get_category_breakdown, get_daily_series, get_dashboard,
    get_monthly_series, get_summary,
};
