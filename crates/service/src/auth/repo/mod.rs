//! Persistence adapters for the auth repository.

pub mod seaorm;
