use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::errors::{AppError, ErrorResponse};
use crate::store::RecordStore;

use super::models::{ListTransactionsQuery, TransactionDraft, TransactionIdPath, TransactionResponse};
use super::service::TransactionService;

/// GET /api/transactions - List transactions, most recent first
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Transactions ordered by date descending", body = Vec<TransactionResponse>),
        (status = 400, description = "Malformed month filter", body = ErrorResponse),
        (status = 503, description = "Record store unavailable", body = ErrorResponse)
    )
)]
#[get("/api/transactions")]
pub async fn list_transactions(
    store: web::Data<RecordStore>,
    query: web::Query<ListTransactionsQuery>,
) -> Result<HttpResponse, AppError> {
    let month = query.month()?;
    let transactions = TransactionService::list_transactions(store.get_ref(), month).await?;

    let response: Vec<TransactionResponse> = transactions.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/transactions/{id} - Get a specific transaction by ID
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    responses(
        (status = 200, description = "Transaction details", body = TransactionResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
#[get("/api/transactions/{id}")]
pub async fn get_transaction(
    store: web::Data<RecordStore>,
    path: web::Path<TransactionIdPath>,
) -> Result<HttpResponse, AppError> {
    let transaction = TransactionService::get_transaction(store.get_ref(), &path.id).await?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}

/// POST /api/transactions - Record a new transaction
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = TransactionDraft,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
#[post("/api/transactions")]
pub async fn create_transaction(
    store: web::Data<RecordStore>,
    body: web::Json<TransactionDraft>,
) -> Result<HttpResponse, AppError> {
    let transaction =
        TransactionService::create_transaction(store.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Created().json(TransactionResponse::from(transaction)))
}

/// PUT /api/transactions/{id} - Replace a transaction
#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    request_body = TransactionDraft,
    responses(
        (status = 200, description = "Transaction replaced", body = TransactionResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
#[put("/api/transactions/{id}")]
pub async fn update_transaction(
    store: web::Data<RecordStore>,
    path: web::Path<TransactionIdPath>,
    body: web::Json<TransactionDraft>,
) -> Result<HttpResponse, AppError> {
    let transaction =
        TransactionService::update_transaction(store.get_ref(), &path.id, body.into_inner())
            .await?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}

/// DELETE /api/transactions/{id} - Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
#[delete("/api/transactions/{id}")]
pub async fn delete_transaction(
    store: web::Data<RecordStore>,
    path: web::Path<TransactionIdPath>,
) -> Result<HttpResponse, AppError> {
    TransactionService::delete_transaction(store.get_ref(), &path.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
