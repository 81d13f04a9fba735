use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use crate::auth::domain::{AdminIdentity, NewAdmin, StoredAdmin};
use crate::auth::errors::AuthError;
use crate::auth::repository::AdminRepository;
use models::admin_user;

pub struct SeaOrmAdminRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn identity(m: &admin_user::Model) -> AdminIdentity {
    AdminIdentity { id: m.id, username: m.username.clone(), is_admin: m.is_admin }
}

#[async_trait::async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredAdmin>, AuthError> {
        let res = admin_user::Entity::find()
            .filter(admin_user::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|m| StoredAdmin { identity: identity(&m), password_hash: m.password_hash }))
    }

    async fn create(&self, admin: NewAdmin) -> Result<AdminIdentity, AuthError> {
        let am = admin_user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(admin.username),
            password_hash: Set(admin.password_hash),
            is_admin: Set(admin.is_admin),
            created_at: Set(Utc::now().into()),
        };
        match am.insert(&self.db).await {
            Ok(m) => Ok(identity(&m)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Err(AuthError::Conflict),
            Err(e) => Err(AuthError::Repository(e.to_string())),
        }
    }
}
