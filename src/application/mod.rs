pub mod identity;
pub mod ledger;

// Re-export key types for convenience
pub use identity::{AuthResult, UserService};
pub use ledger::LedgerService;
