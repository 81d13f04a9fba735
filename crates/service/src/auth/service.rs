use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AdminIdentity, LoginInput, NewAdmin};
use super::errors::AuthError;
use super::repository::AdminRepository;

/// Hash a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// Auth business service independent of web framework
pub struct AuthService<R: AdminRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: AdminRepository + ?Sized> Clone for AuthService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: AdminRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create the admin identity unless the username already exists.
    /// Returns `true` when a new account was written; an existing account
    /// is never overwritten.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, repository::mock::MockAdminRepository};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAdminRepository::default()));
    /// assert!(tokio_test::block_on(svc.bootstrap_admin("admin", "s3cret-pass")).unwrap());
    /// assert!(!tokio_test::block_on(svc.bootstrap_admin("admin", "other-pass")).unwrap());
    /// ```
    #[instrument(skip(self, password))]
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation("username and password are required".into()));
        }
        if self.repo.find_by_username(username).await?.is_some() {
            debug!("admin already present");
            return Ok(false);
        }
        let password_hash = hash_password(password)?;
        match self.repo.create(NewAdmin { username: username.to_string(), password_hash, is_admin: true }).await {
            Ok(identity) => {
                info!(admin_id = %identity.id, username = %identity.username, "admin_bootstrapped");
                Ok(true)
            }
            // lost a race with a concurrent bootstrap
            Err(AuthError::Conflict) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Verify credentials against the stored hash.
    ///
    /// The returned identity carries `is_admin`; deciding whether a
    /// non-admin may proceed is left to the caller.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, domain::LoginInput, errors::AuthError, repository::mock::MockAdminRepository};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAdminRepository::default()));
    /// tokio_test::block_on(svc.bootstrap_admin("admin", "Passw0rd")).unwrap();
    /// let who = tokio_test::block_on(svc.authenticate(LoginInput { username: "admin".into(), password: "Passw0rd".into() })).unwrap();
    /// assert!(who.is_admin);
    /// let bad = tokio_test::block_on(svc.authenticate(LoginInput { username: "admin".into(), password: "nope".into() }));
    /// assert!(matches!(bad, Err(AuthError::Unauthorized)));
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn authenticate(&self, input: LoginInput) -> Result<AdminIdentity, AuthError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            warn!("empty credentials");
            return Err(AuthError::Unauthorized);
        }
        let stored = match self.repo.find_by_username(input.username.trim()).await? {
            Some(s) => s,
            None => {
                warn!("unknown username");
                return Err(AuthError::Unauthorized);
            }
        };

        let parsed = PasswordHash::new(&stored.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!("password mismatch");
            return Err(AuthError::Unauthorized);
        }
        info!(admin_id = %stored.identity.id, is_admin = stored.identity.is_admin, "authenticated");
        Ok(stored.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAdminRepository;

    fn service() -> AuthService<MockAdminRepository> {
        AuthService::new(Arc::new(MockAdminRepository::default()))
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let repo = Arc::new(MockAdminRepository::default());
        let svc = AuthService::new(repo.clone());
        svc.bootstrap_admin("admin", "plain-text").await.unwrap();
        let stored = repo.find_by_username("admin").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "plain-text");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_unauthorized() {
        let svc = service();
        svc.bootstrap_admin("admin", "right").await.unwrap();
        assert!(matches!(svc.authenticate(login("ghost", "right")).await, Err(AuthError::Unauthorized)));
        assert!(matches!(svc.authenticate(login("admin", "wrong")).await, Err(AuthError::Unauthorized)));
        assert!(matches!(svc.authenticate(login("", "")).await, Err(AuthError::Unauthorized)));
        assert!(svc.authenticate(login(" admin ", "right")).await.is_ok());
    }

    #[tokio::test]
    async fn non_admin_identity_is_returned_as_such() {
        let repo = Arc::new(MockAdminRepository::default());
        repo.create(NewAdmin { username: "editor".into(), password_hash: hash_password("pw").unwrap(), is_admin: false })
            .await
            .unwrap();
        let svc = AuthService::new(repo);
        let who = svc.authenticate(login("editor", "pw")).await.unwrap();
        assert!(!who.is_admin);
    }

    #[tokio::test]
    async fn bootstrap_rejects_blank_credentials() {
        let svc = service();
        assert!(matches!(svc.bootstrap_admin("  ", "pw").await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.bootstrap_admin("admin", "").await, Err(AuthError::Validation(_))));
    }
}
