use std::sync::Arc;

use clinica_core::{AppError, AppResult, UserIdentity};
use clinica_domain::{
    AuditAction, EmailAddress, GranularPermissions, PolicyUser, Role, create_default_permissions,
    has_full_access,
};
use tracing::info;

use crate::{AuditEvent, AuditRepository, UserDirectory};

const USER_RESOURCE: &str = "tenant_user";

/// Application service behind the users administration screen.
#[derive(Clone)]
pub struct UserAdminService {
    directory: Arc<dyn UserDirectory>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl UserAdminService {
    /// Creates a new user administration service.
    #[must_use]
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            directory,
            audit_repository,
        }
    }

    /// Lists the tenant's users.
    pub async fn list_users(&self, actor: &UserIdentity) -> AppResult<Vec<PolicyUser>> {
        self.require_administrator(actor).await?;
        self.directory.list_users(actor.tenant_id()).await
    }

    /// Adds a user to the caller's tenant.
    ///
    /// `outro` users start with every granular permission disabled.
    pub async fn create_user(
        &self,
        actor: &UserIdentity,
        uid: &str,
        nome: &str,
        email: &str,
        role: Role,
        active: bool,
    ) -> AppResult<PolicyUser> {
        let administrator = self.require_administrator(actor).await?;

        let uid = uid.trim();
        let nome = nome.trim();
        if nome.is_empty() {
            return Err(AppError::Validation("user name must not be blank".to_owned()));
        }
        let email = EmailAddress::new(email)?;

        if role == Role::SuperAdmin {
            return Err(AppError::Validation(format!(
                "role '{}' cannot be assigned to tenant users",
                Role::SuperAdmin
            )));
        }

        if role == Role::Owner && administrator.role() != Role::Owner {
            return Err(AppError::Forbidden(format!(
                "only an owner may grant role '{}'",
                Role::Owner
            )));
        }

        if self
            .directory
            .find_user(actor.tenant_id(), uid)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("user '{uid}' already exists")));
        }

        let user = PolicyUser::new(uid, role)?
            .with_display_name(Some(nome.to_owned()))
            .with_email(Some(email))
            .with_active(active)
            .with_permissions(role.is_flag_governed().then(create_default_permissions));
        self.directory
            .save_user(actor.tenant_id(), user.clone())
            .await?;

        self.record(
            actor,
            AuditAction::UserCreated,
            uid,
            format!("created user with role '{role}'"),
        )
        .await?;

        info!(uid, actor = actor.uid(), %role, active, "user created");
        Ok(user)
    }

    /// Replaces the granular permissions of an `outro` user.
    pub async fn update_permissions(
        &self,
        actor: &UserIdentity,
        uid: &str,
        permissions: GranularPermissions,
    ) -> AppResult<PolicyUser> {
        self.require_administrator(actor).await?;
        let mut user = self.require_target(actor, uid).await?;

        if !user.role().is_flag_governed() {
            return Err(AppError::Validation(format!(
                "user '{uid}' has role '{}'; granular permissions apply only to '{}'",
                user.role(),
                Role::Outro
            )));
        }

        user.replace_permissions(permissions);
        self.directory
            .save_user(actor.tenant_id(), user.clone())
            .await?;

        let granted = permissions
            .granted_flags()
            .map(|flag| flag.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.record(
            actor,
            AuditAction::UserPermissionsUpdated,
            uid,
            format!("granted [{granted}]"),
        )
        .await?;

        info!(uid, actor = actor.uid(), "user permissions updated");
        Ok(user)
    }

    /// Moves a user to another role, resetting granular permissions.
    pub async fn change_role(
        &self,
        actor: &UserIdentity,
        uid: &str,
        role: Role,
    ) -> AppResult<PolicyUser> {
        let administrator = self.require_administrator(actor).await?;

        if role == Role::SuperAdmin {
            return Err(AppError::Validation(format!(
                "role '{}' cannot be assigned to tenant users",
                Role::SuperAdmin
            )));
        }

        let mut user = self.require_target(actor, uid).await?;

        if user.role() == Role::Owner {
            return Err(AppError::Forbidden(format!(
                "the role of owner '{uid}' cannot be changed"
            )));
        }

        if role == Role::Owner && administrator.role() != Role::Owner {
            return Err(AppError::Forbidden(format!(
                "only an owner may grant role '{}'",
                Role::Owner
            )));
        }

        let previous = user.role();
        user.change_role(role);
        self.directory
            .save_user(actor.tenant_id(), user.clone())
            .await?;

        self.record(
            actor,
            AuditAction::UserRoleChanged,
            uid,
            format!("changed role from '{previous}' to '{role}'"),
        )
        .await?;

        info!(uid, actor = actor.uid(), from = %previous, to = %role, "user role changed");
        Ok(user)
    }

    /// Enables or disables a user account.
    pub async fn set_active(
        &self,
        actor: &UserIdentity,
        uid: &str,
        active: bool,
    ) -> AppResult<PolicyUser> {
        self.require_administrator(actor).await?;

        if !active && uid == actor.uid() {
            return Err(AppError::Validation(
                "administrators cannot deactivate their own account".to_owned(),
            ));
        }

        let mut user = self.require_target(actor, uid).await?;
        if user.is_active() == active {
            return Ok(user);
        }

        user.set_active(active);
        self.directory
            .save_user(actor.tenant_id(), user.clone())
            .await?;

        let verb = if active { "activated" } else { "deactivated" };
        self.record(
            actor,
            AuditAction::UserActivationChanged,
            uid,
            format!("{verb} user '{uid}'"),
        )
        .await?;

        info!(uid, actor = actor.uid(), active, "user activation changed");
        Ok(user)
    }

    async fn require_administrator(&self, actor: &UserIdentity) -> AppResult<PolicyUser> {
        let Some(user) = self
            .directory
            .find_user(actor.tenant_id(), actor.uid())
            .await?
        else {
            return Err(AppError::Unauthorized(format!(
                "user '{}' has no account in tenant '{}'",
                actor.uid(),
                actor.tenant_id()
            )));
        };

        if !user.is_active() || !has_full_access(Some(&user)) {
            return Err(AppError::Forbidden(format!(
                "user '{}' may not administer users",
                actor.uid()
            )));
        }

        Ok(user)
    }

    async fn require_target(&self, actor: &UserIdentity, uid: &str) -> AppResult<PolicyUser> {
        self.directory
            .find_user(actor.tenant_id(), uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{uid}' does not exist")))
    }

    async fn record(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        uid: &str,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                tenant_id: actor.tenant_id(),
                subject: actor.uid().to_owned(),
                action,
                resource_type: USER_RESOURCE.to_owned(),
                resource_id: uid.to_owned(),
                detail: Some(detail),
            })
            .await
    }
}
