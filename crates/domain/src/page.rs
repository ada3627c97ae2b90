use serde::{Deserialize, Serialize};

use crate::{AccessGuard, Capability, Role};

/// Guarded pages of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppPage {
    /// Dashboard.
    Home,
    /// Appointment calendar.
    Agenda,
    /// Patient list.
    Patients,
    /// Single patient record.
    PatientDetail,
    /// WhatsApp messages.
    Messages,
    /// Financial reports.
    Reports,
    /// Company settings.
    Settings,
    /// Anamnesis form templates.
    AnamnesisTemplates,
    /// Practitioners management.
    Professionals,
    /// Services catalog.
    Services,
    /// Company users management.
    Users,
    /// Subscription plan.
    Plan,
    /// Own profile.
    Profile,
    /// Help center.
    Help,
    /// Platform operator dashboard.
    AdminPanel,
    /// Platform sales leads.
    AdminLeads,
    /// Platform companies.
    AdminCompanies,
}

const FULL: &[Role] = &[Role::Owner, Role::Admin];
const STAFF: &[Role] = &[Role::Owner, Role::Admin, Role::Pro, Role::Atendente];
const PLATFORM: &[Role] = &[Role::SuperAdmin];

impl AppPage {
    /// Returns the page path.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Agenda => "/agenda",
            Self::Patients => "/pacientes",
            Self::PatientDetail => "/pacientes/detalhe",
            Self::Messages => "/mensagens",
            Self::Reports => "/relatorios",
            Self::Settings => "/configuracoes",
            Self::AnamnesisTemplates => "/configuracoes/modelos-anamnese",
            Self::Professionals => "/profissionais",
            Self::Services => "/servicos",
            Self::Users => "/usuarios",
            Self::Plan => "/plano",
            Self::Profile => "/perfil",
            Self::Help => "/ajuda",
            Self::AdminPanel => "/admin",
            Self::AdminLeads => "/admin/leads",
            Self::AdminCompanies => "/admin/empresas",
        }
    }

    /// Returns the guard protecting this page.
    #[must_use]
    pub fn guard(&self) -> AccessGuard {
        match self {
            Self::Home => AccessGuard::allow(Role::all()),
            Self::Agenda => {
                AccessGuard::allow(Role::company_roles()).requiring(Capability::OpenAgenda)
            }
            Self::Patients | Self::PatientDetail => {
                AccessGuard::allow(Role::company_roles()).requiring(Capability::OpenPatients)
            }
            Self::Messages => {
                AccessGuard::allow(&[Role::Owner, Role::Admin, Role::Atendente, Role::Outro])
            }
            Self::Reports => AccessGuard::allow(&[Role::Owner, Role::Admin, Role::Outro])
                .requiring(Capability::FullFinancials),
            Self::Professionals => AccessGuard::allow(&[Role::Owner, Role::Admin, Role::Outro])
                .requiring(Capability::ProfessionalsMenu),
            Self::Services => {
                AccessGuard::allow(Role::company_roles()).requiring(Capability::OpenServices)
            }
            Self::Settings | Self::AnamnesisTemplates | Self::Users | Self::Plan => {
                AccessGuard::allow(FULL)
            }
            Self::Profile => AccessGuard::allow(STAFF),
            Self::Help => AccessGuard::allow(Role::company_roles()),
            Self::AdminPanel | Self::AdminLeads | Self::AdminCompanies => {
                AccessGuard::allow(PLATFORM)
            }
        }
    }

    /// Returns all guarded pages.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AppPage] = &[
            AppPage::Home,
            AppPage::Agenda,
            AppPage::Patients,
            AppPage::PatientDetail,
            AppPage::Messages,
            AppPage::Reports,
            AppPage::Settings,
            AppPage::AnamnesisTemplates,
            AppPage::Professionals,
            AppPage::Services,
            AppPage::Users,
            AppPage::Plan,
            AppPage::Profile,
            AppPage::Help,
            AppPage::AdminPanel,
            AppPage::AdminLeads,
            AppPage::AdminCompanies,
        ];

        ALL
    }

    /// Resolves the most specific guarded page for a browser path.
    ///
    /// Query strings and fragments are ignored. Unguarded paths such as the
    /// sign-in screen yield `None`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        Self::all()
            .iter()
            .copied()
            .filter(|page| {
                let page_path = page.path();
                if page_path == "/" {
                    return path == "/";
                }
                path == page_path
                    || path
                        .strip_prefix(page_path)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|page| page.path().len())
    }
}

#[cfg(test)]
mod tests {
    use super::AppPage;
    use crate::{
        AccessDecision, Capability, DenialReason, GranularPermissions, GuardSettings, PolicyUser,
        Role,
    };

    fn user(role: Role) -> PolicyUser {
        PolicyUser::new("u-1", role).unwrap_or_else(|_| panic!("test"))
    }

    #[test]
    fn every_page_resolves_from_its_own_path() {
        for page in AppPage::all() {
            assert_eq!(AppPage::from_path(page.path()), Some(*page));
        }
    }

    #[test]
    fn most_specific_page_wins() {
        assert_eq!(
            AppPage::from_path("/pacientes/detalhe?id=42"),
            Some(AppPage::PatientDetail)
        );
        assert_eq!(
            AppPage::from_path("/configuracoes/modelos-anamnese/"),
            Some(AppPage::AnamnesisTemplates)
        );
        assert_eq!(AppPage::from_path("/admin/leads/7"), Some(AppPage::AdminLeads));
        assert_eq!(AppPage::from_path(""), Some(AppPage::Home));
    }

    #[test]
    fn unguarded_paths_resolve_to_nothing() {
        assert_eq!(AppPage::from_path("/signin"), None);
        assert_eq!(AppPage::from_path("/assinatura-orcamento"), None);
    }

    #[test]
    fn platform_operator_only_reaches_platform_pages_and_home() {
        let operator = user(Role::SuperAdmin);
        let settings = GuardSettings::default();
        for page in AppPage::all() {
            let granted = page.guard().evaluate(Some(&operator), None, &settings).is_granted();
            let expected = matches!(
                page,
                AppPage::Home | AppPage::AdminPanel | AppPage::AdminLeads | AppPage::AdminCompanies
            );
            assert_eq!(granted, expected, "{}", page.path());
        }
    }

    #[test]
    fn outro_needs_flags_for_flag_guarded_pages() {
        let settings = GuardSettings::default();
        let bare = user(Role::Outro);
        assert_eq!(
            AppPage::Agenda.guard().evaluate(Some(&bare), None, &settings),
            AccessDecision::Denied(DenialReason::MissingGrant(Capability::OpenAgenda))
        );

        let viewer = bare.clone().with_permissions(Some(GranularPermissions {
            agenda_visualizacao: true,
            ..GranularPermissions::default()
        }));
        assert!(AppPage::Agenda.guard().evaluate(Some(&viewer), None, &settings).is_granted());
        assert!(!AppPage::Services.guard().evaluate(Some(&viewer), None, &settings).is_granted());
    }

    #[test]
    fn professional_reaches_patients_but_not_reports() {
        let settings = GuardSettings::default();
        let pro = user(Role::Pro);
        assert!(AppPage::PatientDetail.guard().evaluate(Some(&pro), None, &settings).is_granted());
        assert!(AppPage::Services.guard().evaluate(Some(&pro), None, &settings).is_granted());
        assert_eq!(
            AppPage::Reports.guard().evaluate(Some(&pro), None, &settings),
            AccessDecision::Denied(DenialReason::RoleNotAllowed)
        );
        assert_eq!(
            AppPage::Messages.guard().evaluate(Some(&pro), None, &settings),
            AccessDecision::Denied(DenialReason::RoleNotAllowed)
        );
    }

    #[test]
    fn profile_excludes_outro() {
        let decision = AppPage::Profile
            .guard()
            .evaluate(Some(&user(Role::Outro)), None, &GuardSettings::default());
        assert_eq!(decision, AccessDecision::Denied(DenialReason::RoleNotAllowed));
    }

    #[test]
    fn guards_expose_their_roles_and_requirement() {
        let reports = AppPage::Reports.guard();
        assert_eq!(reports.allowed(), &[Role::Owner, Role::Admin, Role::Outro]);
        assert_eq!(reports.requirement(), Some(Capability::FullFinancials));

        let users = AppPage::Users.guard();
        assert_eq!(users.allowed(), &[Role::Owner, Role::Admin]);
        assert_eq!(users.requirement(), None);

        assert_eq!(AppPage::Home.guard().allowed(), Role::all());
    }
}
