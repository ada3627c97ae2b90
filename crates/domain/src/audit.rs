use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by user administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A user was added to the tenant.
    UserCreated,
    /// Granular permissions of a user were replaced.
    UserPermissionsUpdated,
    /// A user was moved to another role.
    UserRoleChanged,
    /// A user was enabled or disabled.
    UserActivationChanged,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreated => "user.created",
            Self::UserPermissionsUpdated => "user.permissions.updated",
            Self::UserRoleChanged => "user.role.changed",
            Self::UserActivationChanged => "user.activation.changed",
        }
    }
}
