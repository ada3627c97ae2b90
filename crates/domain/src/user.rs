//! Tenant user projection consumed by access policy.

use clinica_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{GranularPermissions, Role};

/// Policy-relevant view of a tenant user.
///
/// Built once at the storage boundary; the evaluator only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyUser {
    uid: NonEmptyString,
    role: Role,
    permissions: Option<GranularPermissions>,
    active: bool,
    email: Option<EmailAddress>,
    display_name: Option<String>,
    professional_id: Option<String>,
}

impl PolicyUser {
    /// Creates an active user with no granular permissions attached.
    pub fn new(uid: impl Into<String>, role: Role) -> AppResult<Self> {
        Ok(Self {
            uid: NonEmptyString::new(uid)?,
            role,
            permissions: None,
            active: true,
            email: None,
            display_name: None,
            professional_id: None,
        })
    }

    /// Attaches or removes the granular permission record.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Option<GranularPermissions>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Sets the activation flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: Option<EmailAddress>) -> Self {
        self.email = email;
        self
    }

    /// Sets the display name, dropping blank values.
    #[must_use]
    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = trimmed(display_name);
        self
    }

    /// Links the user to a professional record, dropping blank values.
    #[must_use]
    pub fn with_professional_id(mut self, professional_id: Option<String>) -> Self {
        self.professional_id = trimmed(professional_id);
        self
    }

    /// Returns the stable user id.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    /// Returns the user's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the attached permission record, if any.
    #[must_use]
    pub fn permissions(&self) -> Option<&GranularPermissions> {
        self.permissions.as_ref()
    }

    /// Returns the effective grants: the attached record, or all flags off.
    #[must_use]
    pub fn grants(&self) -> GranularPermissions {
        self.permissions.unwrap_or_default()
    }

    /// Returns whether the account is enabled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the contact email, if known.
    #[must_use]
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Returns the display name, if known.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the linked professional id, if any.
    #[must_use]
    pub fn professional_id(&self) -> Option<&str> {
        self.professional_id.as_deref()
    }

    /// Switches the role, resetting permissions to match the new role.
    ///
    /// `outro` starts from an all-disabled record; every other role carries
    /// no record at all.
    pub fn change_role(&mut self, role: Role) {
        self.role = role;
        self.permissions = role
            .is_flag_governed()
            .then(crate::create_default_permissions);
    }

    /// Replaces the granular permission record.
    pub fn replace_permissions(&mut self, permissions: GranularPermissions) {
        self.permissions = Some(permissions);
    }

    /// Enables or disables the account.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated, lower-cased email address.
    ///
    /// Requires exactly one `@`, a non-empty local part and a dotted domain.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(format!(
                "email address '{normalized}' must contain '@'"
            )));
        };

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.contains('@') || !domain.contains('.') {
            return Err(AppError::Validation(format!(
                "email domain '{domain}' is invalid"
            )));
        }

        if normalized.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PermissionFlag;

    fn user(role: Role) -> PolicyUser {
        PolicyUser::new("uid-1", role).unwrap_or_else(|_| panic!("test"))
    }

    #[test]
    fn blank_uid_is_rejected() {
        assert!(PolicyUser::new("  ", Role::Owner).is_err());
    }

    #[test]
    fn missing_permissions_mean_no_grants() {
        let user = user(Role::Outro);
        assert!(user.permissions().is_none());
        assert_eq!(user.grants(), GranularPermissions::default());
    }

    #[test]
    fn switching_to_outro_installs_default_permissions() {
        let mut user = user(Role::Atendente);
        user.change_role(Role::Outro);
        assert_eq!(user.permissions(), Some(&GranularPermissions::default()));
    }

    #[test]
    fn switching_away_from_outro_clears_permissions() {
        let mut user = user(Role::Outro).with_permissions(Some(
            GranularPermissions::default().with_flag(PermissionFlag::MenuServicos, true),
        ));
        user.change_role(Role::Pro);
        assert!(user.permissions().is_none());
    }

    #[test]
    fn blank_optional_text_is_dropped() {
        let user = user(Role::Pro)
            .with_display_name(Some("   ".to_owned()))
            .with_professional_id(Some(" prof-9 ".to_owned()));
        assert_eq!(user.display_name(), None);
        assert_eq!(user.professional_id(), Some("prof-9"));
    }

    #[test]
    fn valid_email_is_normalized() {
        let email = EmailAddress::new("  Recepcao@Clinica.COM ");
        assert_eq!(
            email.unwrap_or_else(|_| panic!("test")).as_str(),
            "recepcao@clinica.com"
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("noatsign").is_err());
        assert!(EmailAddress::new("@clinica.com").is_err());
        assert!(EmailAddress::new("user@nodot").is_err());
        assert!(EmailAddress::new("a@b@c.com").is_err());
    }
}
