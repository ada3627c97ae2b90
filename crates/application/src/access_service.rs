use std::sync::Arc;

use clinica_core::{AppError, AppResult, UserIdentity};
use clinica_domain::{
    AccessDecision, AppPage, Capability, CapabilitySnapshot, GuardSettings, NavigationItem,
    PolicyUser,
};
use tracing::debug;

use crate::UserDirectory;
use crate::navigation::{clinic_navigation, filter_navigation};

/// Application service answering access questions for the signed-in caller.
///
/// The caller and settings are always passed in; nothing is read from ambient
/// state.
#[derive(Clone)]
pub struct AccessService {
    directory: Arc<dyn UserDirectory>,
    settings: GuardSettings,
}

impl AccessService {
    /// Creates a new access service.
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectory>, settings: GuardSettings) -> Self {
        Self {
            directory,
            settings,
        }
    }

    /// Loads the caller's policy record in the caller's tenant.
    pub async fn resolve_user(&self, actor: &UserIdentity) -> AppResult<Option<PolicyUser>> {
        self.directory
            .find_user(actor.tenant_id(), actor.uid())
            .await
    }

    /// Evaluates every capability for the caller.
    pub async fn capabilities(&self, actor: &UserIdentity) -> AppResult<CapabilitySnapshot> {
        let user = self.resolve_user(actor).await?;
        Ok(CapabilitySnapshot::for_user(user.as_ref()))
    }

    /// Returns the sidebar entries visible to the caller.
    pub async fn navigation(&self, actor: &UserIdentity) -> AppResult<Vec<NavigationItem>> {
        let user = self.resolve_user(actor).await?;
        Ok(filter_navigation(&clinic_navigation()?, user.as_ref()))
    }

    /// Returns the guard decision for one page.
    pub async fn page_decision(
        &self,
        actor: &UserIdentity,
        page: AppPage,
    ) -> AppResult<AccessDecision> {
        let user = self.resolve_user(actor).await?;
        Ok(page
            .guard()
            .evaluate(user.as_ref(), actor.email(), &self.settings))
    }

    /// Ensures the caller may open a page.
    pub async fn authorize_page(&self, actor: &UserIdentity, page: AppPage) -> AppResult<()> {
        match self.page_decision(actor, page).await? {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Unauthenticated => {
                debug!(uid = actor.uid(), page = page.path(), "page refused: no tenant user");
                Err(AppError::Unauthorized(format!(
                    "user '{}' has no account in tenant '{}'",
                    actor.uid(),
                    actor.tenant_id()
                )))
            }
            AccessDecision::Denied(reason) => {
                debug!(uid = actor.uid(), page = page.path(), ?reason, "page refused");
                Err(AppError::Forbidden(format!(
                    "user '{}' may not open '{}': {}",
                    actor.uid(),
                    page.path(),
                    reason.message()
                )))
            }
        }
    }

    /// Ensures the caller holds a capability, for action-level checks.
    pub async fn require_capability(
        &self,
        actor: &UserIdentity,
        capability: Capability,
    ) -> AppResult<()> {
        let Some(user) = self.resolve_user(actor).await? else {
            return Err(AppError::Unauthorized(format!(
                "user '{}' has no account in tenant '{}'",
                actor.uid(),
                actor.tenant_id()
            )));
        };

        if !user.is_active() {
            return Err(AppError::Forbidden(format!(
                "user '{}' is inactive",
                actor.uid()
            )));
        }

        if capability.evaluate(Some(&user)) {
            return Ok(());
        }

        debug!(
            uid = actor.uid(),
            capability = capability.as_str(),
            "capability refused"
        );
        Err(AppError::Forbidden(format!(
            "user '{}' is missing capability '{}'",
            actor.uid(),
            capability.as_str()
        )))
    }
}
