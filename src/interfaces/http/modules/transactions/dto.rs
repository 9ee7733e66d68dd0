//! Request/response types for ledger operations

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewTransaction, Transaction, TransactionKind};

/// Add-transaction request body.
///
/// `type` must be `income` or `expense`; anything else is rejected at
/// deserialization. The amount is a magnitude, checked for sign by the
/// ledger service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddTransactionRequest {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 4.5)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub date: NaiveDate,
}

impl From<AddTransactionRequest> for NewTransaction {
    fn from(req: AddTransactionRequest) -> Self {
        NewTransaction {
            description: req.description,
            amount: req.amount,
            kind: req.kind,
            date: req.date,
        }
    }
}

/// Transaction as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: String,
    pub user_id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
}

impl From<Transaction> for TransactionDto {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            description: t.description,
            amount: t.amount,
            kind: t.kind,
            date: t.date,
        }
    }
}
