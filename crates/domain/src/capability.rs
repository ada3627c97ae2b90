use std::str::FromStr;

use clinica_core::AppError;
use serde::{Deserialize, Serialize};

use crate::{PermissionFlag, PolicyUser, policy};

/// Named access predicate, usable as data by menus and page guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// [`policy::has_full_access`].
    FullAccess,
    /// [`policy::is_professional`].
    Professional,
    /// [`policy::is_other_role`].
    OtherRole,
    /// [`policy::can_edit_appointments`].
    EditAppointments,
    /// [`policy::can_view_all_agendas`].
    ViewAllAgendas,
    /// [`policy::can_access_patient_debits`].
    PatientDebits,
    /// [`policy::can_access_only_own_financials`].
    OnlyOwnFinancials,
    /// [`policy::has_full_financial_access`].
    FullFinancials,
    /// [`policy::can_access_professionals_menu`].
    ProfessionalsMenu,
    /// [`policy::can_access_clients_menu`].
    ClientsMenu,
    /// [`policy::can_access_services_menu`].
    ServicesMenu,
    /// [`policy::can_open_agenda`].
    OpenAgenda,
    /// [`policy::can_open_patients`].
    OpenPatients,
    /// [`policy::can_open_services`].
    OpenServices,
}

impl Capability {
    /// Evaluates the predicate for a possibly absent user.
    #[must_use]
    pub fn evaluate(self, user: Option<&PolicyUser>) -> bool {
        match self {
            Self::FullAccess => policy::has_full_access(user),
            Self::Professional => policy::is_professional(user),
            Self::OtherRole => policy::is_other_role(user),
            Self::EditAppointments => policy::can_edit_appointments(user),
            Self::ViewAllAgendas => policy::can_view_all_agendas(user),
            Self::PatientDebits => policy::can_access_patient_debits(user),
            Self::OnlyOwnFinancials => policy::can_access_only_own_financials(user),
            Self::FullFinancials => policy::has_full_financial_access(user),
            Self::ProfessionalsMenu => policy::can_access_professionals_menu(user),
            Self::ClientsMenu => policy::can_access_clients_menu(user),
            Self::ServicesMenu => policy::can_access_services_menu(user),
            Self::OpenAgenda => policy::can_open_agenda(user),
            Self::OpenPatients => policy::can_open_patients(user),
            Self::OpenServices => policy::can_open_services(user),
        }
    }

    /// Returns the flags that can grant this capability to `outro` users.
    #[must_use]
    pub fn granting_flags(&self) -> &'static [PermissionFlag] {
        match self {
            Self::FullAccess | Self::Professional | Self::OtherRole => &[],
            Self::EditAppointments => &[PermissionFlag::AgendaEdicao],
            Self::ViewAllAgendas => &[PermissionFlag::AgendaVisualizacao],
            Self::PatientDebits => &[PermissionFlag::FinanceiroDebitosPacientes],
            Self::OnlyOwnFinancials => &[PermissionFlag::FinanceiroApenasProprios],
            Self::FullFinancials => &[PermissionFlag::FinanceiroAcessoCompleto],
            Self::ProfessionalsMenu => &[PermissionFlag::MenuProfissionais],
            Self::ClientsMenu | Self::OpenPatients => &[PermissionFlag::MenuClientes],
            Self::ServicesMenu | Self::OpenServices => &[PermissionFlag::MenuServicos],
            Self::OpenAgenda => &[
                PermissionFlag::AgendaVisualizacao,
                PermissionFlag::AgendaEdicao,
            ],
        }
    }

    /// Returns a stable identifier for logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullAccess => "full_access",
            Self::Professional => "professional",
            Self::OtherRole => "other_role",
            Self::EditAppointments => "edit_appointments",
            Self::ViewAllAgendas => "view_all_agendas",
            Self::PatientDebits => "patient_debits",
            Self::OnlyOwnFinancials => "only_own_financials",
            Self::FullFinancials => "full_financials",
            Self::ProfessionalsMenu => "professionals_menu",
            Self::ClientsMenu => "clients_menu",
            Self::ServicesMenu => "services_menu",
            Self::OpenAgenda => "open_agenda",
            Self::OpenPatients => "open_patients",
            Self::OpenServices => "open_services",
        }
    }

    /// Returns all capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::FullAccess,
            Capability::Professional,
            Capability::OtherRole,
            Capability::EditAppointments,
            Capability::ViewAllAgendas,
            Capability::PatientDebits,
            Capability::OnlyOwnFinancials,
            Capability::FullFinancials,
            Capability::ProfessionalsMenu,
            Capability::ClientsMenu,
            Capability::ServicesMenu,
            Capability::OpenAgenda,
            Capability::OpenPatients,
            Capability::OpenServices,
        ];

        ALL
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown capability '{value}'")))
    }
}

/// Every capability evaluated once for one user, for UI rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySnapshot {
    /// Owner or admin.
    pub full_access: bool,
    /// Practitioner role.
    pub professional: bool,
    /// Custom flag-governed role.
    pub other_role: bool,
    /// May create or modify appointments.
    pub edit_appointments: bool,
    /// May view every professional's agenda.
    pub view_all_agendas: bool,
    /// May open patient debts.
    pub patient_debits: bool,
    /// Financial view limited to own entries.
    pub only_own_financials: bool,
    /// Full financial control and reports.
    pub full_financials: bool,
    /// Practitioners management area.
    pub professionals_menu: bool,
    /// Clients management area.
    pub clients_menu: bool,
    /// Services catalog area.
    pub services_menu: bool,
    /// May open the agenda page.
    pub open_agenda: bool,
    /// May open the patients pages.
    pub open_patients: bool,
    /// May open the services page.
    pub open_services: bool,
}

impl CapabilitySnapshot {
    /// Evaluates every capability for the given user.
    #[must_use]
    pub fn for_user(user: Option<&PolicyUser>) -> Self {
        Self {
            full_access: Capability::FullAccess.evaluate(user),
            professional: Capability::Professional.evaluate(user),
            other_role: Capability::OtherRole.evaluate(user),
            edit_appointments: Capability::EditAppointments.evaluate(user),
            view_all_agendas: Capability::ViewAllAgendas.evaluate(user),
            patient_debits: Capability::PatientDebits.evaluate(user),
            only_own_financials: Capability::OnlyOwnFinancials.evaluate(user),
            full_financials: Capability::FullFinancials.evaluate(user),
            professionals_menu: Capability::ProfessionalsMenu.evaluate(user),
            clients_menu: Capability::ClientsMenu.evaluate(user),
            services_menu: Capability::ServicesMenu.evaluate(user),
            open_agenda: Capability::OpenAgenda.evaluate(user),
            open_patients: Capability::OpenPatients.evaluate(user),
            open_services: Capability::OpenServices.evaluate(user),
        }
    }

    /// Returns the snapshot value for one capability.
    #[must_use]
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::FullAccess => self.full_access,
            Capability::Professional => self.professional,
            Capability::OtherRole => self.other_role,
            Capability::EditAppointments => self.edit_appointments,
            Capability::ViewAllAgendas => self.view_all_agendas,
            Capability::PatientDebits => self.patient_debits,
            Capability::OnlyOwnFinancials => self.only_own_financials,
            Capability::FullFinancials => self.full_financials,
            Capability::ProfessionalsMenu => self.professionals_menu,
            Capability::ClientsMenu => self.clients_menu,
            Capability::ServicesMenu => self.services_menu,
            Capability::OpenAgenda => self.open_agenda,
            Capability::OpenPatients => self.open_patients,
            Capability::OpenServices => self.open_services,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Capability, CapabilitySnapshot};
    use crate::{GranularPermissions, PolicyUser, Role};

    #[test]
    fn capability_identifier_roundtrip() {
        for capability in Capability::all() {
            assert_eq!(
                Capability::from_str(capability.as_str()).ok(),
                Some(*capability)
            );
        }
        assert!(Capability::from_str("menu_agenda").is_err());
    }

    #[test]
    fn snapshot_matches_individual_evaluation() {
        let user = PolicyUser::new("u-1", Role::Outro)
            .unwrap_or_else(|_| panic!("test"))
            .with_permissions(Some(GranularPermissions {
                agenda_visualizacao: true,
                menu_clientes: true,
                ..GranularPermissions::default()
            }));

        let snapshot = CapabilitySnapshot::for_user(Some(&user));
        for capability in Capability::all() {
            assert_eq!(
                snapshot.get(*capability),
                capability.evaluate(Some(&user)),
                "{}",
                capability.as_str()
            );
        }
        assert!(snapshot.open_agenda);
        assert!(!snapshot.edit_appointments);
    }

    #[test]
    fn anonymous_snapshot_is_all_false() {
        assert_eq!(CapabilitySnapshot::for_user(None), CapabilitySnapshot::default());
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let encoded = serde_json::to_value(CapabilitySnapshot::default()).unwrap_or_default();
        assert!(encoded.get("viewAllAgendas").is_some());
        assert!(encoded.get("onlyOwnFinancials").is_some());
    }

    #[test]
    fn flag_driven_capabilities_name_their_flags() {
        assert!(Capability::FullAccess.granting_flags().is_empty());
        assert_eq!(Capability::OpenAgenda.granting_flags().len(), 2);
    }
}
