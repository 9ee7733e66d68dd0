use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or subtracts from the balance.
///
/// The sign lives here; `amount` is always a non-negative magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Transaction model
///
/// `user_id` is set once at creation from the authenticated caller and is
/// never reassigned. There is no update operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

/// Input for creating a transaction; the owner and id are filled in by the
/// ledger service.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub date: NaiveDate,
}
