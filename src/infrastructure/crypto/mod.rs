//! Credential primitives: bcrypt password hashing and JWT tokens

pub mod jwt;
pub mod password;
