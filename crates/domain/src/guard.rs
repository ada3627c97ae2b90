use serde::{Deserialize, Serialize};

use crate::{Capability, EmailAddress, PolicyUser, Role};

/// Deployment switches that relax page guards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardSettings {
    /// Admits every active user to every page. Meant for local development.
    pub development_bypass: bool,
    /// Support accounts admitted to every page regardless of role or status.
    pub support_emails: Vec<EmailAddress>,
}

impl GuardSettings {
    /// Returns whether a signed-in email belongs to a configured support account.
    ///
    /// The email is the one asserted by the identity provider, compared after
    /// the usual normalization.
    #[must_use]
    pub fn is_support_email(&self, email: Option<&str>) -> bool {
        email
            .and_then(|email| EmailAddress::new(email).ok())
            .is_some_and(|email| self.support_emails.contains(&email))
    }
}

/// Why a guard refused a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "capability")]
pub enum DenialReason {
    /// The account is disabled.
    Inactive,
    /// The user's role is not on the guard's allow-list.
    RoleNotAllowed,
    /// The role is allowed but the required capability is missing.
    MissingGrant(Capability),
}

impl DenialReason {
    /// Returns the message shown on the access-denied screen.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Inactive => "Sua conta está inativa. Entre em contato com o administrador.",
            Self::RoleNotAllowed | Self::MissingGrant(_) => {
                "Você não tem permissão para acessar esta página."
            }
        }
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "detail")]
pub enum AccessDecision {
    /// Render the page.
    Granted,
    /// Nobody is signed in; send to sign-in.
    Unauthenticated,
    /// Signed in but refused.
    Denied(DenialReason),
}

impl AccessDecision {
    /// Returns whether the page may render.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Role allow-list plus an optional capability protecting one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGuard {
    allowed: Vec<Role>,
    requirement: Option<Capability>,
}

impl AccessGuard {
    /// Creates a guard admitting the listed roles.
    #[must_use]
    pub fn allow(roles: &[Role]) -> Self {
        Self {
            allowed: roles.to_vec(),
            requirement: None,
        }
    }

    /// Additionally requires a capability.
    #[must_use]
    pub fn requiring(mut self, capability: Capability) -> Self {
        self.requirement = Some(capability);
        self
    }

    /// Returns the allowed roles.
    #[must_use]
    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// Returns the required capability, if any.
    #[must_use]
    pub fn requirement(&self) -> Option<Capability> {
        self.requirement
    }

    /// Decides whether the user may open the guarded page.
    ///
    /// `identity_email` is the signed-in email from the identity provider, not
    /// the one stored on the tenant user.
    #[must_use]
    pub fn evaluate(
        &self,
        user: Option<&PolicyUser>,
        identity_email: Option<&str>,
        settings: &GuardSettings,
    ) -> AccessDecision {
        let Some(user) = user else {
            return AccessDecision::Unauthenticated;
        };

        if settings.is_support_email(identity_email) {
            return AccessDecision::Granted;
        }

        if !user.is_active() {
            return AccessDecision::Denied(DenialReason::Inactive);
        }

        if settings.development_bypass {
            return AccessDecision::Granted;
        }

        if !self.allowed.contains(&user.role()) {
            return AccessDecision::Denied(DenialReason::RoleNotAllowed);
        }

        match self.requirement {
            Some(capability) if !capability.evaluate(Some(user)) => {
                AccessDecision::Denied(DenialReason::MissingGrant(capability))
            }
            _ => AccessDecision::Granted,
        }
    }
}
