//! Ledger module — owner-scoped transaction operations

pub mod service;

pub use service::LedgerService;
