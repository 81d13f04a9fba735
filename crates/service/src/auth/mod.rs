//! Auth gate: three-layer architecture (domain, repository, service).
//!
//! A single stored admin identity is verified against an Argon2 hash on
//! every call; no session or token is issued.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
