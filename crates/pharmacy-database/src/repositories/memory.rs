//! In-memory user store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use pharmacy_core::error::AppError;
use pharmacy_core::result::AppResult;
use pharmacy_entity::user::model::{CreateUser, UpdateUserAccess};
use pharmacy_entity::user::{User, UserRole, UserStatus};

use super::UserStore;

/// Process-local user store guarded by an async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&data.email)) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            permissions: data.permissions.to_vec(),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_access(&self, data: UpdateUserAccess) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&data.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))?;
        user.role = data.role;
        user.permissions = data.permissions.to_vec();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_status(&self, id: Uuid, status: UserStatus) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.status = status;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::error::ErrorKind;
    use pharmacy_entity::permission::PermissionSet;

    fn new_user(email: &str, role: UserRole) -> CreateUser {
        CreateUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
            permissions: ["read_products"].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let store = MemoryUserStore::new();
        let created = store
            .create(new_user("Clerk@Pharmacy.local", UserRole::Staff))
            .await
            .unwrap();

        let found = store.find_by_email("clerk@pharmacy.local").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.create(new_user("a@pharmacy.local", UserRole::Staff)).await.unwrap();

        let err = store
            .create(new_user("A@pharmacy.local", UserRole::Manager))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_access_replaces_grants() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("b@pharmacy.local", UserRole::Staff)).await.unwrap();

        let updated = store
            .update_access(UpdateUserAccess {
                id: user.id,
                role: UserRole::Pharmacist,
                permissions: PermissionSet::from_iter(["write_orders"]),
            })
            .await
            .unwrap();

        assert_eq!(updated.role, UserRole::Pharmacist);
        assert_eq!(updated.permissions, vec!["write_orders".to_string()]);
    }

    #[tokio::test]
    async fn test_list_filters_by_role() {
        let store = MemoryUserStore::new();
        store.create(new_user("c@pharmacy.local", UserRole::Staff)).await.unwrap();
        store.create(new_user("d@pharmacy.local", UserRole::Admin)).await.unwrap();

        let admins = store.list(Some(UserRole::Admin)).await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(store.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let store = MemoryUserStore::new();
        let err = store
            .update_status(Uuid::new_v4(), UserStatus::Inactive)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
