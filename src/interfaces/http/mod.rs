//! HTTP REST API interfaces
//!
//! - `common`: Response envelope and validated JSON extractor
//! - `middleware`: Token authentication middleware
//! - `modules`: Per-resource DTOs and request handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
