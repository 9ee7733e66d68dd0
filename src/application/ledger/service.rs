//! Transaction ledger service — application-layer orchestration
//!
//! Owner-scoped list/add/delete over the store document.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, NewTransaction, Transaction};
use crate::infrastructure::storage::Store;

/// Ledger service — every operation is scoped to an already-verified
/// user identity; the caller never names an owner explicitly.
pub struct LedgerService {
    store: Arc<dyn Store>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All transactions owned by `user_id`, newest date first.
    /// Stable for equal dates, so same-day records keep insertion order.
    pub async fn list_for_user(&self, user_id: &str) -> Vec<Transaction> {
        let doc = self.store.load().await;
        let mut txs: Vec<Transaction> = doc
            .transactions
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    /// Append a transaction owned by `user_id`.
    ///
    /// `amount` is a magnitude; the sign convention lives in `kind`, so a
    /// negative value is malformed input rather than a reversed entry.
    pub async fn add(&self, user_id: &str, new_tx: NewTransaction) -> DomainResult<Transaction> {
        if new_tx.amount.is_sign_negative() {
            return Err(DomainError::Validation(
                "amount must be non-negative".to_string(),
            ));
        }

        let mut doc = self.store.load().await;
        let transaction = Transaction {
            id: self.store.new_id(),
            user_id: user_id.to_string(),
            description: new_tx.description,
            amount: new_tx.amount,
            kind: new_tx.kind,
            date: new_tx.date,
        };
        doc.transactions.push(transaction.clone());
        self.store.save(&doc).await;

        info!(user_id = %user_id, transaction_id = %transaction.id, "Transaction added");
        Ok(transaction)
    }

    /// Remove the transaction with `tx_id` iff it is owned by `user_id`.
    ///
    /// A wrong owner fails with `Forbidden` (the caller proved an identity,
    /// just not the right one) and leaves the store untouched.
    pub async fn delete(&self, user_id: &str, tx_id: &str) -> DomainResult<()> {
        let mut doc = self.store.load().await;

        let Some(index) = doc.transactions.iter().position(|t| t.id == tx_id) else {
            return Err(DomainError::NotFound {
                entity: "Transaction",
                field: "id",
                value: tx_id.to_string(),
            });
        };

        if doc.transactions[index].user_id != user_id {
            return Err(DomainError::Forbidden(
                "transaction belongs to another user".to_string(),
            ));
        }

        doc.transactions.remove(index);
        self.store.save(&doc).await;

        info!(user_id = %user_id, transaction_id = %tx_id, "Transaction removed");
        Ok(())
    }
}
