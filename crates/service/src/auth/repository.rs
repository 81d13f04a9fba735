use async_trait::async_trait;

use super::domain::{AdminIdentity, NewAdmin, StoredAdmin};
use super::errors::AuthError;

/// Repository abstraction for admin identities.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredAdmin>, AuthError>;
    /// Insert a new identity; `AuthError::Conflict` when the username is taken.
    async fn create(&self, admin: NewAdmin) -> Result<AdminIdentity, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAdminRepository {
        admins: Mutex<HashMap<String, StoredAdmin>>, // key: username
    }

    #[async_trait]
    impl AdminRepository for MockAdminRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<StoredAdmin>, AuthError> {
            Ok(self.admins.lock().await.get(username).cloned())
        }

        async fn create(&self, admin: NewAdmin) -> Result<AdminIdentity, AuthError> {
            let mut admins = self.admins.lock().await;
            if admins.contains_key(&admin.username) {
                return Err(AuthError::Conflict);
            }
            let identity = AdminIdentity { id: Uuid::new_v4(), username: admin.username.clone(), is_admin: admin.is_admin };
            admins.insert(admin.username, StoredAdmin { identity: identity.clone(), password_hash: admin.password_hash });
            Ok(identity)
        }
    }
}
