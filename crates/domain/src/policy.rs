//! Pure access predicates over an optional signed-in user.
//!
//! Every predicate is total: a missing user, a missing permission record or a
//! role without the capability all answer `false`. Granular flags are only
//! consulted for [`Role::Outro`]; full-access roles are never checked against
//! flags.

use crate::{PermissionFlag, PolicyUser, Role};

fn role_is(user: Option<&PolicyUser>, roles: &[Role]) -> bool {
    user.is_some_and(|user| roles.contains(&user.role()))
}

fn outro_flag(user: Option<&PolicyUser>, flag: PermissionFlag) -> bool {
    user.is_some_and(|user| user.role().is_flag_governed() && user.grants().flag(flag))
}

/// Owner or admin.
#[must_use]
pub fn has_full_access(user: Option<&PolicyUser>) -> bool {
    user.is_some_and(|user| user.role().has_full_access())
}

/// Practitioner; sees only their own agenda.
#[must_use]
pub fn is_professional(user: Option<&PolicyUser>) -> bool {
    role_is(user, &[Role::Pro])
}

/// Custom role governed by granular permissions.
#[must_use]
pub fn is_other_role(user: Option<&PolicyUser>) -> bool {
    role_is(user, &[Role::Outro])
}

/// Create or modify appointments.
#[must_use]
pub fn can_edit_appointments(user: Option<&PolicyUser>) -> bool {
    role_is(user, &[Role::Owner, Role::Admin, Role::Pro, Role::Atendente])
        || outro_flag(user, PermissionFlag::AgendaEdicao)
}

/// View the agenda of every professional.
#[must_use]
pub fn can_view_all_agendas(user: Option<&PolicyUser>) -> bool {
    role_is(user, &[Role::Owner, Role::Admin, Role::Atendente])
        || outro_flag(user, PermissionFlag::AgendaVisualizacao)
}

/// Patient debts tab.
#[must_use]
pub fn can_access_patient_debits(user: Option<&PolicyUser>) -> bool {
    has_full_access(user) || outro_flag(user, PermissionFlag::FinanceiroDebitosPacientes)
}

/// Financial visibility restricted to the user's own entries.
///
/// Full-access roles are never scope-limited, so this is `false` for them.
#[must_use]
pub fn can_access_only_own_financials(user: Option<&PolicyUser>) -> bool {
    outro_flag(user, PermissionFlag::FinanceiroApenasProprios)
}

/// Financial control, reports and commission summaries.
#[must_use]
pub fn has_full_financial_access(user: Option<&PolicyUser>) -> bool {
    has_full_access(user) || outro_flag(user, PermissionFlag::FinanceiroAcessoCompleto)
}

/// Practitioners management area.
#[must_use]
pub fn can_access_professionals_menu(user: Option<&PolicyUser>) -> bool {
    has_full_access(user) || outro_flag(user, PermissionFlag::MenuProfissionais)
}

/// Clients and patients management area.
#[must_use]
pub fn can_access_clients_menu(user: Option<&PolicyUser>) -> bool {
    role_is(user, &[Role::Owner, Role::Admin, Role::Atendente])
        || outro_flag(user, PermissionFlag::MenuClientes)
}

/// Services catalog area.
#[must_use]
pub fn can_access_services_menu(user: Option<&PolicyUser>) -> bool {
    has_full_access(user) || outro_flag(user, PermissionFlag::MenuServicos)
}

const STAFF: &[Role] = &[Role::Owner, Role::Admin, Role::Pro, Role::Atendente];

/// Open the agenda page: staff roles, or `outro` allowed to view or edit it.
#[must_use]
pub fn can_open_agenda(user: Option<&PolicyUser>) -> bool {
    role_is(user, STAFF)
        || outro_flag(user, PermissionFlag::AgendaVisualizacao)
        || outro_flag(user, PermissionFlag::AgendaEdicao)
}

/// Open the patients pages: staff roles, or `outro` with the clients menu.
#[must_use]
pub fn can_open_patients(user: Option<&PolicyUser>) -> bool {
    role_is(user, STAFF) || outro_flag(user, PermissionFlag::MenuClientes)
}

/// Open the services page: staff roles, or `outro` with the services menu.
#[must_use]
pub fn can_open_services(user: Option<&PolicyUser>) -> bool {
    role_is(user, STAFF) || outro_flag(user, PermissionFlag::MenuServicos)
}
