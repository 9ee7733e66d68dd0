pub mod document;
pub mod error;
pub mod transaction;
pub mod user;

// Re-export commonly used types
pub use document::StoreDocument;
pub use error::{DomainError, DomainResult};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
pub use user::User;
