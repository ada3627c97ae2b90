use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clinica_application::{AuditEvent, AuditRepository};
use clinica_core::{AppResult, TenantId};
use tokio::sync::RwLock;

/// Audit event with the time it was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAuditEvent {
    /// The appended event.
    pub event: AuditEvent,
    /// Append timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Append-only audit log kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<RecordedAuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a tenant's events, oldest first.
    pub async fn events_for_tenant(&self, tenant_id: TenantId) -> Vec<RecordedAuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|recorded| recorded.event.tenant_id == tenant_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.write().await.push(RecordedAuditEvent {
            event,
            recorded_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clinica_application::{AuditEvent, AuditRepository};
    use clinica_core::TenantId;
    use clinica_domain::AuditAction;

    use super::InMemoryAuditRepository;

    fn event(tenant_id: TenantId, resource_id: &str) -> AuditEvent {
        AuditEvent {
            tenant_id,
            subject: "owner-1".to_owned(),
            action: AuditAction::UserActivationChanged,
            resource_type: "tenant_user".to_owned(),
            resource_id: resource_id.to_owned(),
            detail: None,
        }
    }

    #[tokio::test]
    async fn events_are_kept_per_tenant_in_append_order() {
        let repository = InMemoryAuditRepository::new();
        let clinic = TenantId::new();
        let salon = TenantId::new();

        for (tenant_id, resource_id) in [(clinic, "a"), (salon, "b"), (clinic, "c")] {
            assert!(repository.append_event(event(tenant_id, resource_id)).await.is_ok());
        }

        let recorded = repository.events_for_tenant(clinic).await;
        let resources: Vec<&str> = recorded
            .iter()
            .map(|recorded| recorded.event.resource_id.as_str())
            .collect();
        assert_eq!(resources, vec!["a", "c"]);
        assert!(recorded[0].recorded_at <= recorded[1].recorded_at);
    }
}
