//! SeaORM entities for the site admin backend plus the field-level
//! validation shared by every store.

pub mod errors;
pub mod db;
pub mod validate;
pub mod admin_user;
pub mod advertisement;
pub mod service;
pub mod enquiry;
pub mod visitor;
