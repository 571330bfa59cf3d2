//! Durable keyed storage for transactions and budgets.
//!
//! Repositories talk to [`RecordStore`] and never see which backend sits
//! behind it. Both backends guarantee that a budget upsert is a single atomic
//! step per `(month, category)` key.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use uuid::Uuid;

use crate::budget::models::{Budget, NewBudget};
use crate::errors::AppError;
use crate::month::YearMonth;
use crate::transaction::models::{NewTransaction, Transaction};

#[derive(Clone)]
pub enum RecordStore {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl RecordStore {
    pub fn memory() -> Self {
        RecordStore::Memory(MemoryStore::default())
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        RecordStore::Postgres(PgStore::new(pool))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            RecordStore::Postgres(_) => "postgres",
            RecordStore::Memory(_) => "memory",
        }
    }

    /// Verify the store can be reached.
    pub async fn ping(&self) -> Result<(), AppError> {
        match self {
            RecordStore::Postgres(store) => store.ping().await,
            RecordStore::Memory(_) => Ok(()),
        }
    }

    /// Transactions, most recent date first. With a month, only those dated
    /// in `[first day, first day of next month)`.
    pub async fn list_transactions(
        &self,
        month: Option<YearMonth>,
    ) -> Result<Vec<Transaction>, AppError> {
        match self {
            RecordStore::Postgres(store) => store.list_transactions(month).await,
            RecordStore::Memory(store) => store.list_transactions(month).await,
        }
    }

    pub async fn find_transaction(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        match self {
            RecordStore::Postgres(store) => store.find_transaction(id).await,
            RecordStore::Memory(store) => store.find_transaction(id).await,
        }
    }

    pub async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, AppError> {
        match self {
            RecordStore::Postgres(store) => store.insert_transaction(new).await,
            RecordStore::Memory(store) => store.insert_transaction(new).await,
        }
    }

    /// Replace every field of the record at `id`. `None` when no such record.
    pub async fn replace_transaction(
        &self,
        id: Uuid,
        new: NewTransaction,
    ) -> Result<Option<Transaction>, AppError> {
        match self {
            RecordStore::Postgres(store) => store.replace_transaction(id, new).await,
            RecordStore::Memory(store) => store.replace_transaction(id, new).await,
        }
    }

    /// Returns whether a record was removed.
    pub async fn delete_transaction(&self, id: Uuid) -> Result<bool, AppError> {
        match self {
            RecordStore::Postgres(store) => store.delete_transaction(id).await,
            RecordStore::Memory(store) => store.delete_transaction(id).await,
        }
    }

    pub async fn count_transactions(&self) -> Result<i64, AppError> {
        match self {
            RecordStore::Postgres(store) => store.count_transactions().await,
            RecordStore::Memory(store) => store.count_transactions().await,
        }
    }

    /// Budgets for one month, or the full table.
    pub async fn list_budgets(&self, month: Option<YearMonth>) -> Result<Vec<Budget>, AppError> {
        match self {
            RecordStore::Postgres(store) => store.list_budgets(month).await,
            RecordStore::Memory(store) => store.list_budgets(month).await,
        }
    }

    /// Create the budget for `(month, category)` or replace its amount.
    pub async fn upsert_budget(&self, new: NewBudget) -> Result<Budget, AppError> {
        match self {
            RecordStore::Postgres(store) => store.upsert_budget(new).await,
            RecordStore::Memory(store) => store.upsert_budget(new).await,
        }
    }
}

/// Most recent date first; ties broken by most recently created.
pub(crate) fn sort_recent_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
