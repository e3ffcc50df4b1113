//! Create, list, re-grant, and deactivate console accounts.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use pharmacy_core::config::AuthConfig;
use pharmacy_core::error::AppError;
use pharmacy_database::UserStore;
use pharmacy_entity::permission::PermissionSet;
use pharmacy_entity::user::model::{CreateUser, UpdateUserAccess};
use pharmacy_entity::user::{User, UserProfile, UserRole, UserStatus};

use crate::password::{PasswordHasher, PasswordValidator};
use crate::rbac::RolePolicies;

/// Input for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain password, checked against the password policy.
    pub password: String,
    /// Role.
    pub role: UserRole,
    /// Explicit grants; the role defaults apply when `None`.
    pub permissions: Option<PermissionSet>,
}

/// Account administration on top of the user store.
///
/// Every mutating call takes the acting user, who must be an admin to hand
/// out the `admin` role. Capability checks for the call itself belong to the
/// route guard in front of it.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    policies: RolePolicies,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            policies: RolePolicies::new(),
        }
    }

    /// Lists accounts, optionally for one role.
    pub async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, AppError> {
        self.users.list(role).await
    }

    /// Fetches one account.
    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Provisions an account.
    pub async fn create(&self, actor: &UserProfile, input: NewAccount) -> Result<User, AppError> {
        ensure_may_assign(actor, input.role)?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }
        let email = input.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AppError::validation("Email address is not valid"));
        }

        self.validator.validate(&input.password)?;
        let password_hash = self.hasher.hash_password(&input.password)?;

        let permissions = input
            .permissions
            .unwrap_or_else(|| self.policies.default_permissions(input.role));

        let user = self
            .users
            .create(CreateUser {
                name: name.to_string(),
                email,
                password_hash,
                role: input.role,
                permissions,
            })
            .await?;

        info!(actor = %actor.id, user_id = %user.id, role = %user.role, "Account created");
        Ok(user)
    }

    /// Replaces an account's role and grants.
    pub async fn update_access(
        &self,
        actor: &UserProfile,
        id: Uuid,
        role: UserRole,
        permissions: PermissionSet,
    ) -> Result<User, AppError> {
        ensure_may_assign(actor, role)?;

        let current = self.get(id).await?;
        ensure_may_modify(actor, &current)?;

        let user = self
            .users
            .update_access(UpdateUserAccess {
                id,
                role,
                permissions,
            })
            .await?;

        info!(
            actor = %actor.id,
            user_id = %id,
            role = %role,
            grants = user.permissions.len(),
            "Account access updated"
        );
        Ok(user)
    }

    /// Adds one grant to an account.
    pub async fn grant(
        &self,
        actor: &UserProfile,
        id: Uuid,
        capability: &str,
    ) -> Result<User, AppError> {
        let current = self.get(id).await?;
        let mut permissions = current.permission_set();
        permissions.insert(capability);
        self.update_access(actor, id, current.role, permissions).await
    }

    /// Removes one grant from an account.
    pub async fn revoke(
        &self,
        actor: &UserProfile,
        id: Uuid,
        capability: &str,
    ) -> Result<User, AppError> {
        let current = self.get(id).await?;
        let mut permissions = current.permission_set();
        permissions.remove(capability);
        self.update_access(actor, id, current.role, permissions).await
    }

    /// Marks an account inactive. Its tokens stop resolving immediately.
    pub async fn deactivate(&self, actor: &UserProfile, id: Uuid) -> Result<User, AppError> {
        if actor.id == id {
            return Err(AppError::validation("You cannot deactivate your own account"));
        }
        let current = self.get(id).await?;
        ensure_may_modify(actor, &current)?;

        let user = self.users.update_status(id, UserStatus::Inactive).await?;
        info!(actor = %actor.id, user_id = %id, "Account deactivated");
        Ok(user)
    }
}

fn ensure_may_assign(actor: &UserProfile, role: UserRole) -> Result<(), AppError> {
    if role.is_admin() && !actor.role.is_admin() {
        return Err(AppError::authorization("Only an admin may assign the admin role"));
    }
    Ok(())
}

fn ensure_may_modify(actor: &UserProfile, target: &User) -> Result<(), AppError> {
    if target.is_admin() && !actor.role.is_admin() {
        return Err(AppError::authorization(
            "Only an admin may change another admin's account",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::error::ErrorKind;
    use pharmacy_database::repositories::MemoryUserStore;

    const PASSWORD: &str = "Sturdy#Pharmacy42";

    fn service() -> AccountService {
        AccountService::new(Arc::new(MemoryUserStore::new()), &AuthConfig::default())
    }

    fn admin() -> UserProfile {
        UserProfile::new("root", UserRole::Admin, Vec::<String>::new())
    }

    fn manager() -> UserProfile {
        UserProfile::new("mona", UserRole::Manager, ["write_users"])
    }

    fn account(email: &str, role: UserRole) -> NewAccount {
        NewAccount {
            name: "New Hire".into(),
            email: email.into(),
            password: PASSWORD.into(),
            role,
            permissions: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_role_defaults() {
        let svc = service();
        let user = svc
            .create(&admin(), account("hire@pharmacy.local", UserRole::Pharmacist))
            .await
            .unwrap();

        assert_eq!(
            user.permission_set(),
            RolePolicies::new().default_permissions(UserRole::Pharmacist)
        );
    }

    #[tokio::test]
    async fn test_explicit_permissions_win() {
        let svc = service();
        let mut input = account("hire@pharmacy.local", UserRole::Staff);
        input.permissions = Some(["read_reports"].into_iter().collect());

        let user = svc.create(&admin(), input).await.unwrap();
        assert_eq!(user.permissions, vec!["read_reports".to_string()]);
    }

    #[tokio::test]
    async fn test_only_admin_assigns_admin() {
        let svc = service();
        let err = svc
            .create(&manager(), account("boss@pharmacy.local", UserRole::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let user = svc
            .create(&manager(), account("clerk@pharmacy.local", UserRole::Staff))
            .await
            .unwrap();
        let err = svc
            .update_access(&manager(), user.id, UserRole::Admin, PermissionSet::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let svc = service();
        let mut input = account("hire@pharmacy.local", UserRole::Staff);
        input.password = "password".into();

        let err = svc.create(&admin(), input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_grant_and_revoke() {
        let svc = service();
        let user = svc
            .create(&admin(), account("hire@pharmacy.local", UserRole::Staff))
            .await
            .unwrap();

        let user = svc.grant(&admin(), user.id, "write_products").await.unwrap();
        assert!(user.permission_set().contains("write_products"));

        let user = svc.revoke(&admin(), user.id, "write_products").await.unwrap();
        assert!(!user.permission_set().contains("write_products"));
    }

    #[tokio::test]
    async fn test_deactivate() {
        let svc = service();
        let actor = admin();
        let user = svc
            .create(&actor, account("hire@pharmacy.local", UserRole::Staff))
            .await
            .unwrap();

        let user = svc.deactivate(&actor, user.id).await.unwrap();
        assert_eq!(user.status, UserStatus::Inactive);

        let err = svc.deactivate(&actor, actor.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc.deactivate(&actor, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_deactivate_admin() {
        let svc = service();
        let admin_user = svc
            .create(&admin(), account("chief@pharmacy.local", UserRole::Admin))
            .await
            .unwrap();
        let mona = UserProfile::new("mona", UserRole::Manager, ["delete_users"]);

        let err = svc.deactivate(&mona, admin_user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let still = svc.get(admin_user.id).await.unwrap();
        assert_eq!(still.status, UserStatus::Active);
    }
}
