use std::fmt::{Display, Formatter};
use std::str::FromStr;

use clinica_core::AppError;
use serde::{Deserialize, Serialize};

/// Coarse account category of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator managing companies; holds no tenant capability.
    SuperAdmin,
    /// Company owner.
    Owner,
    /// Company administrator.
    Admin,
    /// Practitioner who works their own agenda.
    Pro,
    /// Front-desk attendant.
    Atendente,
    /// Custom role whose capabilities come only from granular permissions.
    Outro,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Pro => "pro",
            Self::Atendente => "atendente",
            Self::Outro => "outro",
        }
    }

    /// Returns the label shown to clinic staff.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Administrador",
            Self::Owner => "Proprietário",
            Self::Admin => "Administrador",
            Self::Pro => "Profissional",
            Self::Atendente => "Atendente",
            Self::Outro => "Recepcionista",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::SuperAdmin,
            Role::Owner,
            Role::Admin,
            Role::Pro,
            Role::Atendente,
            Role::Outro,
        ];

        ALL
    }

    /// Returns the roles a company user can hold.
    #[must_use]
    pub fn company_roles() -> &'static [Self] {
        const COMPANY: &[Role] = &[
            Role::Owner,
            Role::Admin,
            Role::Pro,
            Role::Atendente,
            Role::Outro,
        ];

        COMPANY
    }

    /// Returns whether the role alone grants blanket tenant access.
    #[must_use]
    pub fn has_full_access(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Returns whether the role's capabilities come from granular permissions.
    #[must_use]
    pub fn is_flag_governed(&self) -> bool {
        matches!(self, Self::Outro)
    }

    /// Parses a role read from storage.
    ///
    /// Tolerates surrounding whitespace and letter case; anything else that
    /// is not a known role yields `None` so callers deny by default.
    #[must_use]
    pub fn parse_stored(value: &str) -> Option<Self> {
        Self::from_str(value.trim().to_ascii_lowercase().as_str()).ok()
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Self::SuperAdmin),
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "pro" => Ok(Self::Pro),
            "atendente" => Ok(Self::Atendente),
            "outro" => Ok(Self::Outro),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Role;

    #[test]
    fn role_roundtrip_storage_value() {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str()).ok(), Some(*role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("manager").is_err());
        assert!(Role::from_str("Owner").is_err());
    }

    #[test]
    fn stored_role_parsing_is_lenient_about_case_and_whitespace() {
        assert_eq!(Role::parse_stored(" Owner "), Some(Role::Owner));
        assert_eq!(Role::parse_stored("ATENDENTE"), Some(Role::Atendente));
        assert_eq!(Role::parse_stored("recepcionista"), None);
        assert_eq!(Role::parse_stored(""), None);
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        let encoded = serde_json::to_string(&Role::SuperAdmin).unwrap_or_default();
        assert_eq!(encoded, "\"super_admin\"");
    }

    #[test]
    fn company_roles_exclude_platform_operator() {
        assert!(!Role::company_roles().contains(&Role::SuperAdmin));
        assert_eq!(Role::company_roles().len(), Role::all().len() - 1);
    }

    #[test]
    fn only_owner_and_admin_have_full_access() {
        let full: Vec<Role> = Role::all()
            .iter()
            .copied()
            .filter(Role::has_full_access)
            .collect();
        assert_eq!(full, vec![Role::Owner, Role::Admin]);
    }
}
