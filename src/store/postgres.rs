use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::budget::models::{Budget, NewBudget};
use crate::category::Category;
use crate::errors::AppError;
use crate::month::YearMonth;
use crate::transaction::models::{NewTransaction, Transaction};

/// Database row for transactions
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    amount: Decimal,
    description: String,
    date: NaiveDate,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: row.id,
            amount: row.amount,
            description: row.description,
            date: row.date,
            category: stored_category(&row.category)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for budgets
#[derive(Debug, FromRow)]
struct BudgetRow {
    id: Uuid,
    month: String,
    category: String,
    amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BudgetRow> for Budget {
    type Error = AppError;

    fn try_from(row: BudgetRow) -> Result<Self, Self::Error> {
        let month = row.month.parse::<YearMonth>().map_err(|_| {
            AppError::InternalError(format!("Stored budget has malformed month '{}'", row.month))
        })?;

        Ok(Budget {
            id: row.id,
            month,
            category: stored_category(&row.category)?,
            amount: row.amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn stored_category(raw: &str) -> Result<Category, AppError> {
    Category::parse(raw)
        .ok_or_else(|| AppError::InternalError(format!("Stored record has unknown category '{raw}'")))
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Postgres-backed record store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::InternalError(format!("Migration failed: {e}")))
    }

    pub(super) async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub(super) async fn list_transactions(
        &self,
        month: Option<YearMonth>,
    ) -> Result<Vec<Transaction>, AppError> {
        let rows = if let Some(month) = month {
            sqlx::query_as::<_, TransactionRow>(
                r#"
                SELECT id, amount, description, date, category, created_at, updated_at
                FROM transactions
                WHERE date >= $1 AND date < $2
                ORDER BY date DESC, created_at DESC
                "#,
            )
            .bind(month.first_day())
            .bind(month.next_month_start())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, TransactionRow>(
                r#"
                SELECT id, amount, description, date, category, created_at, updated_at
                FROM transactions
                ORDER BY date DESC, created_at DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        };

        convert_all(rows)
    }

    pub(super) async fn find_transaction(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, amount, description, date, category, created_at, updated_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Transaction::try_from)
        .transpose()
    }

    pub(super) async fn insert_transaction(
        &self,
        new: NewTransaction,
    ) -> Result<Transaction, AppError> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (id, amount, description, date, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, amount, description, date, category, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.amount)
        .bind(&new.description)
        .bind(new.date)
        .bind(new.category.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub(super) async fn replace_transaction(
        &self,
        id: Uuid,
        new: NewTransaction,
    ) -> Result<Option<Transaction>, AppError> {
        sqlx::query_as::<_, TransactionRow>(
            r#"
            UPDATE transactions
            SET amount = $1, description = $2, date = $3, category = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, amount, description, date, category, created_at, updated_at
            "#,
        )
        .bind(new.amount)
        .bind(&new.description)
        .bind(new.date)
        .bind(new.category.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Transaction::try_from)
        .transpose()
    }

    pub(super) async fn delete_transaction(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub(super) async fn count_transactions(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub(super) async fn list_budgets(
        &self,
        month: Option<YearMonth>,
    ) -> Result<Vec<Budget>, AppError> {
        let rows = if let Some(month) = month {
            sqlx::query_as::<_, BudgetRow>(
                r#"
                SELECT id, month, category, amount, created_at, updated_at
                FROM budgets
                WHERE month = $1
                ORDER BY category ASC
                "#,
            )
            .bind(month.to_string())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, BudgetRow>(
                r#"
                SELECT id, month, category, amount, created_at, updated_at
                FROM budgets
                ORDER BY month ASC, category ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        };

        convert_all(rows)
    }

    /// One statement; concurrent upserts of a key serialize on the unique index.
    pub(super) async fn upsert_budget(&self, new: NewBudget) -> Result<Budget, AppError> {
        let row = sqlx::query_as::<_, BudgetRow>(
            r#"
            INSERT INTO budgets (id, month, category, amount)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (month, category)
            DO UPDATE SET amount = EXCLUDED.amount, updated_at = NOW()
            RETURNING id, month, category, amount, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.month.to_string())
        .bind(new.category.as_str())
        .bind(new.amount)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }
}
