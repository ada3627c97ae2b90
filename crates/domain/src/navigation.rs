use clinica_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{Capability, PolicyUser, Role};

/// Sidebar entry, optionally grouping child entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    key: NonEmptyString,
    label: NonEmptyString,
    href: Option<String>,
    icon: Option<String>,
    roles: Vec<Role>,
    requirement: Option<Capability>,
    children: Vec<NavigationItem>,
}

impl NavigationItem {
    /// Creates a validated entry visible to the listed roles.
    ///
    /// `href`, when present, must be an absolute in-app path.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        href: Option<&str>,
        roles: &[Role],
    ) -> AppResult<Self> {
        let key = NonEmptyString::new(key)?;
        if let Some(href) = href
            && !href.starts_with('/')
        {
            return Err(AppError::Validation(format!(
                "navigation item '{key}' href '{href}' must start with '/'"
            )));
        }

        Ok(Self {
            key,
            label: NonEmptyString::new(label)?,
            href: href.map(ToOwned::to_owned),
            icon: None,
            roles: roles.to_vec(),
            requirement: None,
            children: Vec::new(),
        })
    }

    /// Sets the icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Requires a capability on top of the role check.
    #[must_use]
    pub fn with_requirement(mut self, capability: Capability) -> Self {
        self.requirement = Some(capability);
        self
    }

    /// Replaces the child entries.
    #[must_use]
    pub fn with_children(mut self, children: Vec<NavigationItem>) -> Self {
        self.children = children;
        self
    }

    /// Returns the stable entry key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the entry label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the target path, if the entry is a link.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Returns the icon name.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the roles the entry is listed for.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns the extra capability requirement.
    #[must_use]
    pub fn requirement(&self) -> Option<Capability> {
        self.requirement
    }

    /// Returns the child entries.
    #[must_use]
    pub fn children(&self) -> &[NavigationItem] {
        &self.children
    }

    /// Returns whether the user passes this entry's own role and requirement checks.
    ///
    /// Children are not considered.
    #[must_use]
    pub fn admits(&self, user: Option<&PolicyUser>) -> bool {
        let Some(user) = user else {
            return false;
        };

        self.roles.contains(&user.role())
            && self
                .requirement
                .is_none_or(|capability| capability.evaluate(Some(user)))
    }

    /// Returns whether the entry links to `path` or to a page below it.
    ///
    /// The root link only matches the root path itself.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        let Some(href) = self.href.as_deref() else {
            return false;
        };

        if href == "/" {
            return path == "/";
        }

        path == href
            || path
                .strip_prefix(href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationItem;
    use crate::{Capability, GranularPermissions, PolicyUser, Role};

    fn item(href: &str, roles: &[Role]) -> NavigationItem {
        NavigationItem::new("entry", "Entry", Some(href), roles)
            .unwrap_or_else(|_| panic!("test"))
    }

    #[test]
    fn relative_href_is_rejected() {
        assert!(NavigationItem::new("agenda", "Agenda", Some("agenda"), &[Role::Owner]).is_err());
        assert!(NavigationItem::new(" ", "Agenda", None, &[Role::Owner]).is_err());
    }

    #[test]
    fn root_link_matches_only_root() {
        let home = item("/", &[Role::Owner]);
        assert!(home.is_active("/"));
        assert!(!home.is_active("/agenda"));
    }

    #[test]
    fn links_match_nested_paths_but_not_siblings_sharing_a_prefix() {
        let patients = item("/pacientes", &[Role::Owner]);
        assert!(patients.is_active("/pacientes"));
        assert!(patients.is_active("/pacientes/detalhe"));
        assert!(!patients.is_active("/pacientes-antigos"));
        assert!(!patients.is_active("/agenda"));
    }

    #[test]
    fn admits_requires_role_and_requirement() {
        let reports = item("/relatorios", &[Role::Owner, Role::Admin, Role::Outro])
            .with_requirement(Capability::FullFinancials);

        let owner = PolicyUser::new("o", Role::Owner).unwrap_or_else(|_| panic!("test"));
        let pro = PolicyUser::new("p", Role::Pro).unwrap_or_else(|_| panic!("test"));
        let outro = PolicyUser::new("x", Role::Outro).unwrap_or_else(|_| panic!("test"));
        let finance = outro.clone().with_permissions(Some(GranularPermissions {
            financeiro_acesso_completo: true,
            ..GranularPermissions::default()
        }));

        assert!(reports.admits(Some(&owner)));
        assert!(!reports.admits(Some(&pro)));
        assert!(!reports.admits(Some(&outro)));
        assert!(reports.admits(Some(&finance)));
        assert!(!reports.admits(None));
    }

    #[test]
    fn builder_sets_icon_and_requirement() {
        let plain = item("/agenda", &[Role::Owner]);
        assert_eq!(plain.icon(), None);
        assert_eq!(plain.requirement(), None);

        let agenda = plain
            .with_icon("calendar")
            .with_requirement(Capability::OpenAgenda);
        assert_eq!(agenda.icon(), Some("calendar"));
        assert_eq!(agenda.requirement(), Some(Capability::OpenAgenda));
    }
}
