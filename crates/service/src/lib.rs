//! Service layer providing the business operations behind the admin API.
//! - Entity stores (advertisements, services, enquiries, visitors) split into
//!   domain inputs, a repository trait and its SeaORM/in-memory implementations.
//! - The upload adapter storing images locally or on a remote image host.
//! - The single-credential auth gate.

pub mod errors;
pub mod pagination;
pub mod bulk;
pub mod upsert;
pub mod storage;
pub mod db;
pub mod upload;
pub mod auth;
pub mod advertisements;
pub mod services;
pub mod enquiries;
pub mod visitors;

#[cfg(test)]
pub(crate) mod testing;
