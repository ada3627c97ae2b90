use serde::{Deserialize, Serialize};

use crate::TenantId;

/// Signed-in caller resolved by the identity provider.
///
/// Carries only what is needed to look the caller up inside a tenant; role and
/// granular permissions live on the tenant user record, not on the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    uid: String,
    email: Option<String>,
    tenant_id: TenantId,
}

impl UserIdentity {
    /// Creates a caller identity for the selected tenant context.
    #[must_use]
    pub fn new(uid: impl Into<String>, email: Option<String>, tenant_id: TenantId) -> Self {
        Self {
            uid: uid.into(),
            email,
            tenant_id,
        }
    }

    /// Returns the stable user id from the identity provider.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the tenant the caller is currently acting in.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the same caller acting in another tenant context.
    #[must_use]
    pub fn with_tenant(&self, tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            ..self.clone()
        }
    }
}
