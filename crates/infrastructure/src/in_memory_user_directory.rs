use std::collections::HashMap;

use async_trait::async_trait;
use clinica_application::UserDirectory;
use clinica_core::{AppError, AppResult, TenantId};
use clinica_domain::PolicyUser;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::StoredUserDocument;

/// In-memory user directory holding documents in their persisted shape.
///
/// Documents are keyed by tenant and document id and normalized on every
/// read, so drifted documents behave exactly as they would from storage.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    documents: RwLock<HashMap<(TenantId, String), StoredUserDocument>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw JSON user document, replacing any document with the same id.
    pub async fn insert_document(
        &self,
        tenant_id: TenantId,
        document_id: &str,
        document: Value,
    ) -> AppResult<()> {
        let document: StoredUserDocument = serde_json::from_value(document).map_err(|error| {
            AppError::Validation(format!("invalid user document '{document_id}': {error}"))
        })?;

        self.documents
            .write()
            .await
            .insert((tenant_id, document_id.to_owned()), document);
        Ok(())
    }

    /// Returns a stored document exactly as persisted.
    pub async fn document(
        &self,
        tenant_id: TenantId,
        document_id: &str,
    ) -> Option<StoredUserDocument> {
        self.documents
            .read()
            .await
            .get(&(tenant_id, document_id.to_owned()))
            .cloned()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, tenant_id: TenantId, uid: &str) -> AppResult<Option<PolicyUser>> {
        let documents = self.documents.read().await;

        if let Some(document) = documents
            .get(&(tenant_id, uid.to_owned()))
            .filter(|document| document.belongs_to(uid))
        {
            return Ok(document.clone().into_policy_user(uid));
        }

        Ok(documents
            .iter()
            .filter(|((stored_tenant_id, _), document)| {
                stored_tenant_id == &tenant_id && document.uid.as_deref() == Some(uid)
            })
            .find_map(|((_, document_id), document)| {
                document.clone().into_policy_user(document_id)
            }))
    }

    async fn list_users(&self, tenant_id: TenantId) -> AppResult<Vec<PolicyUser>> {
        let documents = self.documents.read().await;

        let mut users: Vec<PolicyUser> = documents
            .iter()
            .filter(|((stored_tenant_id, _), _)| stored_tenant_id == &tenant_id)
            .filter_map(|((_, document_id), document)| {
                document.clone().into_policy_user(document_id)
            })
            .collect();

        users.sort_by(|left, right| left.uid().cmp(right.uid()));
        Ok(users)
    }

    async fn save_user(&self, tenant_id: TenantId, user: PolicyUser) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        let direct_key = (tenant_id, user.uid().to_owned());
        let direct_hit = documents
            .get(&direct_key)
            .is_some_and(|document| document.belongs_to(user.uid()));
        let key = if direct_hit {
            direct_key
        } else {
            documents
                .iter()
                .find(|((stored_tenant_id, _), document)| {
                    stored_tenant_id == &tenant_id && document.uid.as_deref() == Some(user.uid())
                })
                .map(|(key, _)| key.clone())
                .unwrap_or(direct_key)
        };

        let mut document = StoredUserDocument::from_policy_user(&user, tenant_id);
        if let Some(existing) = documents.get(&key) {
            document.company_id = existing.company_id.clone().or(document.company_id);
        }

        documents.insert(key, document);
        Ok(())
    }
}
