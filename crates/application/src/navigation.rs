//! Sidebar catalog and per-user filtering.

use clinica_domain::{NavigationItem, PolicyUser};

mod catalog;

pub use catalog::clinic_navigation;

/// Keeps the entries the user may see.
///
/// An entry survives when it admits the user; entries with children are
/// rebuilt from their surviving children and dropped when none survive.
#[must_use]
pub fn filter_navigation(items: &[NavigationItem], user: Option<&PolicyUser>) -> Vec<NavigationItem> {
    let Some(user) = user else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.admits(Some(user)))
        .filter_map(|item| {
            if item.children().is_empty() {
                return Some(item.clone());
            }

            let children = filter_navigation(item.children(), Some(user));
            (!children.is_empty()).then(|| item.clone().with_children(children))
        })
        .collect()
}

/// Returns the keys leading from a top-level entry to the entry active for `path`.
///
/// When several links match, the one with the longest href wins. Empty when
/// nothing matches.
#[must_use]
pub fn active_trail(items: &[NavigationItem], path: &str) -> Vec<String> {
    best_trail(items, path)
        .map(|(trail, _)| trail)
        .unwrap_or_default()
}

fn best_trail(items: &[NavigationItem], path: &str) -> Option<(Vec<String>, usize)> {
    items
        .iter()
        .flat_map(|item| {
            let nested = best_trail(item.children(), path).map(|(nested, specificity)| {
                let mut trail = Vec::with_capacity(nested.len() + 1);
                trail.push(item.key().to_owned());
                trail.extend(nested);
                (trail, specificity)
            });
            let own = item
                .is_active(path)
                .then(|| (vec![item.key().to_owned()], item.href().map_or(0, str::len)));

            nested.into_iter().chain(own)
        })
        .max_by_key(|(_, specificity)| *specificity)
}

#[cfg(test)]
mod tests {
    use clinica_domain::{Capability, GranularPermissions, NavigationItem, PolicyUser, Role};

    use super::{active_trail, clinic_navigation, filter_navigation};

    fn user(role: Role) -> PolicyUser {
        PolicyUser::new("u-1", role).unwrap_or_else(|_| panic!("test"))
    }

    fn catalog() -> Vec<NavigationItem> {
        clinic_navigation().unwrap_or_else(|_| panic!("test"))
    }

    fn keys(items: &[NavigationItem]) -> Vec<String> {
        items.iter().map(|item| item.key().to_owned()).collect()
    }

    fn child_keys(items: &[NavigationItem], parent: &str) -> Vec<String> {
        items
            .iter()
            .find(|item| item.key() == parent)
            .map(|item| keys(item.children()))
            .unwrap_or_default()
    }

    #[test]
    fn anonymous_user_sees_nothing() {
        assert!(filter_navigation(&catalog(), None).is_empty());
    }

    #[test]
    fn platform_operator_sees_only_platform_entries() {
        let menu = filter_navigation(&catalog(), Some(&user(Role::SuperAdmin)));
        assert_eq!(keys(&menu), vec!["admin_panel", "admin_leads", "admin_companies"]);
    }

    #[test]
    fn owner_sees_the_whole_company_menu() {
        let menu = filter_navigation(&catalog(), Some(&user(Role::Owner)));
        assert_eq!(
            keys(&menu),
            vec![
                "home", "agenda", "patients", "messages", "reports", "settings", "help"
            ]
        );
        assert_eq!(child_keys(&menu, "settings").len(), 7);
    }

    #[test]
    fn professional_menu_has_no_management_entries() {
        let menu = filter_navigation(&catalog(), Some(&user(Role::Pro)));
        assert_eq!(keys(&menu), vec!["home", "agenda", "patients", "help"]);
    }

    #[test]
    fn bare_outro_loses_flag_gated_entries() {
        let menu = filter_navigation(&catalog(), Some(&user(Role::Outro)));
        assert_eq!(keys(&menu), vec!["home", "messages", "help"]);
    }

    #[test]
    fn outro_flags_unlock_their_entries() {
        let clerk = user(Role::Outro).with_permissions(Some(GranularPermissions {
            agenda_edicao: true,
            menu_clientes: true,
            financeiro_acesso_completo: true,
            ..GranularPermissions::default()
        }));
        let menu = filter_navigation(&catalog(), Some(&clerk));
        assert_eq!(
            keys(&menu),
            vec!["home", "agenda", "patients", "messages", "reports", "help"]
        );
    }

    #[test]
    fn parent_without_surviving_children_is_dropped() {
        let tree = vec![
            NavigationItem::new("tools", "Tools", None, &[Role::Outro])
                .unwrap_or_else(|_| panic!("test"))
                .with_children(vec![
                    NavigationItem::new("catalog", "Catalog", Some("/servicos"), &[Role::Outro])
                        .unwrap_or_else(|_| panic!("test"))
                        .with_requirement(Capability::ServicesMenu),
                ]),
        ];

        assert!(filter_navigation(&tree, Some(&user(Role::Outro))).is_empty());

        let granted = user(Role::Outro).with_permissions(Some(GranularPermissions {
            menu_servicos: true,
            ..GranularPermissions::default()
        }));
        let filtered = filter_navigation(&tree, Some(&granted));
        assert_eq!(child_keys(&filtered, "tools"), vec!["catalog"]);
    }

    #[test]
    fn filtering_does_not_mutate_the_catalog() {
        let catalog = catalog();
        let _ = filter_navigation(&catalog, Some(&user(Role::Pro)));
        assert_eq!(catalog, self::catalog());
    }

    #[test]
    fn active_trail_walks_into_submenus() {
        let catalog = catalog();
        assert_eq!(
            active_trail(&catalog, "/configuracoes/modelos-anamnese"),
            vec!["settings", "anamnesis_templates"]
        );
        assert_eq!(active_trail(&catalog, "/pacientes/detalhe"), vec!["patients"]);
        assert_eq!(active_trail(&catalog, "/"), vec!["home"]);
        assert!(active_trail(&catalog, "/signin").is_empty());
    }

    #[test]
    fn every_catalog_entry_carries_an_icon() {
        fn walk(items: &[NavigationItem]) {
            for item in items {
                assert!(item.icon().is_some_and(|icon| !icon.is_empty()), "{}", item.key());
                walk(item.children());
            }
        }

        let catalog = catalog();
        walk(&catalog);

        let reports = catalog.iter().find(|item| item.key() == "reports");
        assert_eq!(
            reports.and_then(NavigationItem::requirement),
            Some(Capability::FullFinancials)
        );
        let home = catalog.iter().find(|item| item.key() == "home");
        assert_eq!(home.and_then(NavigationItem::requirement), None);
    }
}
