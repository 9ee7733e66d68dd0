//! Ledger API handlers
//!
//! All routes here sit behind the token middleware; the owner identity
//! comes from the `AuthenticatedUser` request extension, never from the
//! request body.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{AddTransactionRequest, TransactionDto};
use crate::application::ledger::LedgerService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Ledger handler state
#[derive(Clone)]
pub struct LedgerHandlerState {
    pub ledger: Arc<LedgerService>,
}

#[utoipa::path(
    get,
    path = "/transactions",
    tag = "Transactions",
    security(("token_auth" = [])),
    responses(
        (status = 200, description = "Caller's transactions, newest date first", body = ApiResponse<Vec<TransactionDto>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_transactions(
    State(state): State<LedgerHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<Vec<TransactionDto>>> {
    let items: Vec<TransactionDto> = state
        .ledger
        .list_for_user(&user.user_id)
        .await
        .into_iter()
        .map(TransactionDto::from)
        .collect();
    Json(ApiResponse::success(items))
}

#[utoipa::path(
    post,
    path = "/transactions/add",
    tag = "Transactions",
    security(("token_auth" = [])),
    request_body = AddTransactionRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<TransactionDto>),
        (status = 400, description = "Malformed body or negative amount"),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn add_transaction(
    State(state): State<LedgerHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<AddTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionDto>>), (StatusCode, Json<ApiResponse<TransactionDto>>)>
{
    match state.ledger.add(&user.user_id, request.into()).await {
        Ok(transaction) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(TransactionDto::from(transaction))),
        )),
        Err(e) => {
            let status = match &e {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiResponse::error(e.to_string()))))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "Transactions",
    security(("token_auth" = [])),
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Removed", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Unknown transaction id")
    )
)]
pub async fn delete_transaction(
    State(state): State<LedgerHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<String>>)> {
    match state.ledger.delete(&user.user_id, &id).await {
        Ok(()) => Ok(Json(ApiResponse::success("Transaction removed".to_string()))),
        Err(e) => {
            let status = match &e {
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiResponse::error(e.to_string()))))
        }
    }
}
