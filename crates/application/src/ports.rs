use async_trait::async_trait;
use clinica_core::{AppResult, TenantId};
use clinica_domain::{AuditAction, PolicyUser};

/// Repository port for tenant users as seen by access policy.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by id inside a tenant.
    ///
    /// Users whose stored record cannot be turned into a policy user (for
    /// example an unknown role) are reported as absent.
    async fn find_user(&self, tenant_id: TenantId, uid: &str) -> AppResult<Option<PolicyUser>>;

    /// Lists the tenant's users ordered by id.
    async fn list_users(&self, tenant_id: TenantId) -> AppResult<Vec<PolicyUser>>;

    /// Inserts or replaces a user.
    async fn save_user(&self, tenant_id: TenantId, user: PolicyUser) -> AppResult<()>;
}

/// Audit event emitted by user administration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Tenant scope for the event.
    pub tenant_id: TenantId,
    /// User that performed the action.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends one event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
