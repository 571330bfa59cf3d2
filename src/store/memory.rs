use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::sort_recent_first;
use crate::budget::models::{Budget, NewBudget};
use crate::category::Category;
use crate::errors::AppError;
use crate::month::YearMonth;
use crate::transaction::models::{NewTransaction, Transaction};

#[derive(Default)]
struct Tables {
    transactions: HashMap<Uuid, Transaction>,
    budgets: HashMap<(YearMonth, Category), Budget>,
}

/// In-process record store. Budgets are keyed by `(month, category)` so the
/// table cannot hold duplicates, and every write runs under one lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub(super) async fn list_transactions(
        &self,
        month: Option<YearMonth>,
    ) -> Result<Vec<Transaction>, AppError> {
        let tables = self.tables.read().await;
        let mut transactions: Vec<Transaction> = tables
            .transactions
            .values()
            .filter(|t| month.map_or(true, |m| m.contains(t.date)))
            .cloned()
            .collect();

        sort_recent_first(&mut transactions);
        Ok(transactions)
    }

    pub(super) async fn find_transaction(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        Ok(self.tables.read().await.transactions.get(&id).cloned())
    }

    pub(super) async fn insert_transaction(
        &self,
        new: NewTransaction,
    ) -> Result<Transaction, AppError> {
        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            amount: new.amount,
            description: new.description,
            date: new.date,
            category: new.category,
            created_at: now,
            updated_at: now,
        };

        self.tables
            .write()
            .await
            .transactions
            .insert(transaction.id, transaction.clone());

        Ok(transaction)
    }

    pub(super) async fn replace_transaction(
        &self,
        id: Uuid,
        new: NewTransaction,
    ) -> Result<Option<Transaction>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.transactions.get_mut(&id) else {
            return Ok(None);
        };

        existing.amount = new.amount;
        existing.description = new.description;
        existing.date = new.date;
        existing.category = new.category;
        existing.updated_at = Utc::now();

        Ok(Some(existing.clone()))
    }

    pub(super) async fn delete_transaction(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.write().await.transactions.remove(&id).is_some())
    }

    pub(super) async fn count_transactions(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.transactions.len() as i64)
    }

    pub(super) async fn list_budgets(
        &self,
        month: Option<YearMonth>,
    ) -> Result<Vec<Budget>, AppError> {
        let tables = self.tables.read().await;
        let mut budgets: Vec<Budget> = tables
            .budgets
            .values()
            .filter(|b| month.map_or(true, |m| b.month == m))
            .cloned()
            .collect();

        budgets.sort_by(|a, b| {
            a.month
                .cmp(&b.month)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });
        Ok(budgets)
    }

    pub(super) async fn upsert_budget(&self, new: NewBudget) -> Result<Budget, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;

        let budget = tables
            .budgets
            .entry((new.month, new.category))
            .and_modify(|existing| {
                existing.amount = new.amount;
                existing.updated_at = now;
            })
            .or_insert_with(|| Budget {
                id: Uuid::new_v4(),
                month: new.month,
                category: new.category,
                amount: new.amount,
                created_at: now,
                updated_at: now,
            });

        Ok(budget.clone())
    }
}
