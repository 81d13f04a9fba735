use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticated identity (business view, no secrets)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

/// Identity plus its PHC-formatted password hash
#[derive(Debug, Clone)]
pub struct StoredAdmin {
    pub identity: AdminIdentity,
    pub password_hash: String,
}

/// Row to persist when bootstrapping an account
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}
