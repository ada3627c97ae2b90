//! Access policy domain: roles, granular permissions and the pure evaluator.

#![forbid(unsafe_code)]

mod audit;
mod capability;
mod guard;
mod navigation;
mod page;
mod permissions;
pub mod policy;
mod role;
mod user;

pub use audit::AuditAction;
pub use capability::{Capability, CapabilitySnapshot};
pub use guard::{AccessDecision, AccessGuard, DenialReason, GuardSettings};
pub use navigation::NavigationItem;
pub use page::AppPage;
pub use permissions::{
    FinancialScope, GranularPermissions, PermissionFlag, PermissionGroup,
    create_default_permissions,
};
pub use policy::{
    can_access_clients_menu, can_access_only_own_financials, can_access_patient_debits,
    can_access_professionals_menu, can_access_services_menu, can_edit_appointments,
    can_open_agenda, can_open_patients, can_open_services, can_view_all_agendas,
    has_full_access, has_full_financial_access, is_other_role, is_professional,
};
pub use role::Role;
pub use user::{EmailAddress, PolicyUser};
