//! # FinTrack Service
//!
//! Minimal personal finance tracker: user accounts with private
//! income/expense ledgers, served over a REST API backed by a single
//! pretty-printed JSON file.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and errors
//! - **application**: Business logic and use cases (identity, ledger)
//! - **infrastructure**: External concerns (flat-file storage, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting support (graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
