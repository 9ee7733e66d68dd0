//! Identity module — user registration & authentication
//!
//! Contains the `UserService` which orchestrates the user-related
//! use-cases: registration and login.

pub mod service;

pub use service::{AuthResult, UserService};
