use tracing::{debug, info};
use uuid::Uuid;

use super::models::{Transaction, TransactionDraft};
use crate::errors::AppError;
use crate::month::YearMonth;
use crate::store::RecordStore;

/// Repository operations over transaction records.
pub struct TransactionService;

impl TransactionService {
    /// Ids are opaque to callers; anything that is not one of ours cannot exist.
    fn parse_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id.trim()).map_err(|_| {
            debug!(id, "Rejecting malformed transaction id");
            Self::not_found()
        })
    }

    fn not_found() -> AppError {
        AppError::NotFound("Transaction not found".to_string())
    }

    /// List transactions, most recent first, optionally restricted to one month.
    pub async fn list_transactions(
        store: &RecordStore,
        month: Option<YearMonth>,
    ) -> Result<Vec<Transaction>, AppError> {
        store.list_transactions(month).await
    }

    pub async fn get_transaction(store: &RecordStore, id: &str) -> Result<Transaction, AppError> {
        let id = Self::parse_id(id)?;
        store
            .find_transaction(id)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// Validate and persist a new transaction. Nothing is written when
    /// validation fails.
    pub async fn create_transaction(
        store: &RecordStore,
        draft: TransactionDraft,
    ) -> Result<Transaction, AppError> {
        let new = draft.into_new()?;
        let transaction = store.insert_transaction(new).await?;

        info!(
            id = %transaction.id,
            category = %transaction.category,
            amount = %transaction.amount,
            "Created transaction"
        );
        Ok(transaction)
    }

    /// Replace every field of an existing transaction.
    pub async fn update_transaction(
        store: &RecordStore,
        id: &str,
        draft: TransactionDraft,
    ) -> Result<Transaction, AppError> {
        let new = draft.into_new()?;
        let id = Self::parse_id(id)?;

        let transaction = store
            .replace_transaction(id, new)
            .await?
            .ok_or_else(Self::not_found)?;

        info!(id = %transaction.id, "Replaced transaction");
        Ok(transaction)
    }

    /// Delete a transaction. A second delete of the same id is `NotFound`.
    pub async fn delete_transaction(store: &RecordStore, id: &str) -> Result<(), AppError> {
        let id = Self::parse_id(id)?;

        if !store.delete_transaction(id).await? {
            debug!(%id, "Delete of unknown transaction");
            return Err(Self::not_found());
        }

        info!(%id, "Deleted transaction");
        Ok(())
    }
}
