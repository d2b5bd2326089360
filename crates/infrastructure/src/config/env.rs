//! Reads `LIVETEST_*` variables into test app settings.

use livetest_domain::{LiveTestSettings, Scheme};

use crate::persistence::SettingsError;

/// Host (and optional port) of the site under test. Required.
pub const HOST_VAR: &str = "LIVETEST_HOST";
/// Default scheme, `http` or `https`.
pub const SCHEME_VAR: &str = "LIVETEST_SCHEME";
/// Base URL relative request paths resolve against.
pub const BASE_URL_VAR: &str = "LIVETEST_BASE_URL";
/// Per-request timeout in milliseconds.
pub const TIMEOUT_MS_VAR: &str = "LIVETEST_TIMEOUT_MS";
/// User-Agent header sent by the client.
pub const USER_AGENT_VAR: &str = "LIVETEST_USER_AGENT";
/// Skip TLS certificate verification when `true` or `1`.
pub const ACCEPT_INVALID_CERTS_VAR: &str = "LIVETEST_ACCEPT_INVALID_CERTS";

/// Builds settings from the process environment.
///
/// # Errors
///
/// Returns [`SettingsError::MissingVar`] when `LIVETEST_HOST` is unset and
/// [`SettingsError::InvalidVar`] for values that do not parse.
pub fn settings_from_env() -> Result<LiveTestSettings, SettingsError> {
    settings_from_lookup(|name| std::env::var(name).ok())
}

/// Builds settings from any variable lookup.
///
/// Empty values count as unset.
///
/// # Errors
///
/// See [`settings_from_env`].
pub fn settings_from_lookup<F>(lookup: F) -> Result<LiveTestSettings, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let host = var(HOST_VAR).ok_or(SettingsError::MissingVar(HOST_VAR))?;
    let mut settings = LiveTestSettings::new(host.trim());

    if let Some(value) = var(SCHEME_VAR) {
        settings.scheme = value
            .trim()
            .parse::<Scheme>()
            .map_err(|e| invalid(SCHEME_VAR, &value, e))?;
    }

    if let Some(value) = var(BASE_URL_VAR) {
        settings.relative_to = Some(value.trim().to_string());
    }

    if let Some(value) = var(TIMEOUT_MS_VAR) {
        settings.timeout_ms = value
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(TIMEOUT_MS_VAR, &value, e))?;
    }

    if let Some(value) = var(USER_AGENT_VAR) {
        settings.user_agent = value;
    }

    if let Some(value) = var(ACCEPT_INVALID_CERTS_VAR) {
        settings.accept_invalid_certs = match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => {
                return Err(invalid(
                    ACCEPT_INVALID_CERTS_VAR,
                    &value,
                    "expected true, false, 1 or 0",
                ));
            }
        };
    }

    settings.validate()?;
    Ok(settings)
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> SettingsError {
    SettingsError::InvalidVar {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_host_only() {
        let settings = settings_from_lookup(lookup(&[(HOST_VAR, "pypi.org")])).unwrap();
        assert_eq!(settings, LiveTestSettings::new("pypi.org"));
    }

    #[test]
    fn test_all_vars() {
        let settings = settings_from_lookup(lookup(&[
            (HOST_VAR, "staging.example.com:8443"),
            (SCHEME_VAR, "https"),
            (BASE_URL_VAR, "/shop/"),
            (TIMEOUT_MS_VAR, "2500"),
            (USER_AGENT_VAR, "smoke-tests"),
            (ACCEPT_INVALID_CERTS_VAR, "1"),
        ]))
        .unwrap();

        assert_eq!(settings.host, "staging.example.com:8443");
        assert_eq!(settings.scheme, Scheme::Https);
        assert_eq!(settings.relative_to.as_deref(), Some("/shop/"));
        assert_eq!(settings.timeout_ms, 2500);
        assert_eq!(settings.user_agent, "smoke-tests");
        assert!(settings.accept_invalid_certs);
    }

    #[test]
    fn test_missing_host() {
        let err = settings_from_lookup(lookup(&[(SCHEME_VAR, "https")])).unwrap_err();
        assert!(matches!(err, SettingsError::MissingVar(HOST_VAR)));

        let err = settings_from_lookup(lookup(&[(HOST_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, SettingsError::MissingVar(HOST_VAR)));
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = settings_from_lookup(lookup(&[(HOST_VAR, "example.com"), (SCHEME_VAR, "ftp")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value \"ftp\" for LIVETEST_SCHEME: Scheme 'ftp' is not supported."
        );
    }

    #[test]
    fn test_bad_timeout() {
        let err = settings_from_lookup(lookup(&[
            (HOST_VAR, "example.com"),
            (TIMEOUT_MS_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidVar {
                name: TIMEOUT_MS_VAR,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_flag() {
        let err = settings_from_lookup(lookup(&[
            (HOST_VAR, "example.com"),
            (ACCEPT_INVALID_CERTS_VAR, "yes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidVar { .. }));
    }

    #[test]
    fn test_host_with_path_is_invalid() {
        let err =
            settings_from_lookup(lookup(&[(HOST_VAR, "example.com/app")])).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }
}
