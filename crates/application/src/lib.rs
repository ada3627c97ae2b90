//! Application services and ports for clinic access control.

#![forbid(unsafe_code)]

mod access_service;
pub mod navigation;
mod ports;
mod user_admin_service;

pub use access_service::AccessService;
pub use navigation::{active_trail, clinic_navigation, filter_navigation};
pub use ports::{AuditEvent, AuditRepository, UserDirectory};
pub use user_admin_service::UserAdminService;
