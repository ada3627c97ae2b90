use std::env;

use clinica_core::{AppError, AppResult};
use clinica_domain::{EmailAddress, GuardSettings};
use tracing::warn;

/// Environment variable enabling the development bypass.
pub const DEVELOPMENT_BYPASS_VAR: &str = "ACCESS_GUARD_DEVELOPMENT_BYPASS";
/// Environment variable listing support account emails, comma separated.
pub const SUPPORT_EMAILS_VAR: &str = "ACCESS_SUPPORT_EMAILS";

/// Loads guard settings from the process environment, reading `.env` first.
pub fn load_guard_settings() -> AppResult<GuardSettings> {
    dotenvy::dotenv().ok();
    parse_guard_settings(|name| env::var(name).ok())
}

/// Builds guard settings from a variable lookup.
pub fn parse_guard_settings(lookup: impl Fn(&str) -> Option<String>) -> AppResult<GuardSettings> {
    let development_bypass = lookup(DEVELOPMENT_BYPASS_VAR)
        .filter(|value| !value.trim().is_empty())
        .map(|value| parse_bool(DEVELOPMENT_BYPASS_VAR, value.trim()))
        .transpose()?
        .unwrap_or(false);

    let support_emails = lookup(SUPPORT_EMAILS_VAR)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(|entry| {
                    EmailAddress::new(entry).map_err(|error| {
                        AppError::Validation(format!("invalid {SUPPORT_EMAILS_VAR}: {error}"))
                    })
                })
                .collect::<AppResult<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    if development_bypass {
        warn!("{DEVELOPMENT_BYPASS_VAR} is enabled; page guards admit every active user");
    }

    Ok(GuardSettings {
        development_bypass,
        support_emails,
    })
}

fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    if value.eq_ignore_ascii_case("true") || value == "1" {
        return Ok(true);
    }

    if value.eq_ignore_ascii_case("false") || value == "0" {
        return Ok(false);
    }

    Err(AppError::Validation(format!(
        "invalid {name} value '{value}': expected true or false"
    )))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clinica_core::AppError;

    use super::{DEVELOPMENT_BYPASS_VAR, SUPPORT_EMAILS_VAR, parse_guard_settings};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn defaults_are_strict() {
        let settings = parse_guard_settings(lookup(&[])).unwrap_or_else(|_| panic!("test"));
        assert!(!settings.development_bypass);
        assert!(settings.support_emails.is_empty());
    }

    #[test]
    fn bypass_and_support_emails_are_read() {
        let settings = parse_guard_settings(lookup(&[
            (DEVELOPMENT_BYPASS_VAR, "TRUE"),
            (SUPPORT_EMAILS_VAR, " Suporte@Clinica.com , ,ops@clinica.com"),
        ]))
        .unwrap_or_else(|_| panic!("test"));

        assert!(settings.development_bypass);
        let emails: Vec<&str> = settings
            .support_emails
            .iter()
            .map(|email| email.as_str())
            .collect();
        assert_eq!(emails, vec!["suporte@clinica.com", "ops@clinica.com"]);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let bypass = parse_guard_settings(lookup(&[(DEVELOPMENT_BYPASS_VAR, "sometimes")]));
        assert!(matches!(bypass, Err(AppError::Validation(_))));

        let emails = parse_guard_settings(lookup(&[(SUPPORT_EMAILS_VAR, "suporte")]));
        assert!(matches!(emails, Err(AppError::Validation(_))));
    }
}
