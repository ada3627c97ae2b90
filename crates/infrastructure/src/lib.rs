//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod access_settings;
mod in_memory_audit_repository;
mod in_memory_user_directory;
mod user_document;

pub use access_settings::{
    DEVELOPMENT_BYPASS_VAR, SUPPORT_EMAILS_VAR, load_guard_settings, parse_guard_settings,
};
pub use in_memory_audit_repository::{InMemoryAuditRepository, RecordedAuditEvent};
pub use in_memory_user_directory::InMemoryUserDirectory;
pub use user_document::{StoredPermissions, StoredUserDocument};
