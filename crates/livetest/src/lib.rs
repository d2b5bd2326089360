//! LiveTest - functional tests against a live site
//!
//! A WebTest-style test app whose requests go to a real HTTP server
//! instead of an in-process application. Cookies persist across requests
//! and redirects are followed on demand.
//!
//! ```ignore
//! let mut app = livetest::connect("pypi.org", "https", None, None)?;
//! let resp = app.get("/").await?;
//! resp.mustcontain(&["Python Package Index"])?;
//! ```

use std::path::Path;

pub use livetest_application::ports::{Connection, ConnectionError, Connector};
pub use livetest_application::{
    ApplicationError, ApplicationResult, RequestOptions, TestApp, test_app::MAX_REDIRECTS,
};
pub use livetest_domain::{
    CookieJar, DomainError, DomainResult, Header, Headers, HttpMethod, LiveTestSettings,
    NavigationMethod, RequestBody, Scheme, StatusExpectation, TestRequest, TestResponse,
};
pub use livetest_infrastructure::{
    ReqwestConnector, SettingsError, SettingsRepository, init_tracing, settings_from_env,
};

/// A test app talking to a live server over reqwest.
pub type LiveTestApp = TestApp<ReqwestConnector>;

/// Error raised while setting up a test app from external settings.
#[derive(Debug, thiserror::Error)]
pub enum LiveTestError {
    /// Settings could not be read.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The test app could not be created.
    #[error(transparent)]
    App(#[from] ApplicationError),
}

/// Creates a test app for `host` with default client settings.
///
/// # Errors
///
/// Returns an error for unsupported schemes or an invalid base URL.
pub fn connect(
    host: &str,
    scheme: &str,
    relative_to: Option<&str>,
    cookiejar: Option<CookieJar>,
) -> ApplicationResult<LiveTestApp> {
    TestApp::new(ReqwestConnector::new(), host, scheme, relative_to, cookiejar)
}

/// Creates a test app from settings, configuring the client from them.
///
/// # Errors
///
/// Returns an error if the settings are invalid.
pub fn from_settings(settings: &LiveTestSettings) -> ApplicationResult<LiveTestApp> {
    TestApp::from_settings(ReqwestConnector::from_settings(settings), settings)
}

/// Creates a test app from `LIVETEST_*` environment variables.
///
/// # Errors
///
/// Returns an error if `LIVETEST_HOST` is unset or a variable is invalid.
pub fn from_env() -> Result<LiveTestApp, LiveTestError> {
    let settings = settings_from_env()?;
    Ok(from_settings(&settings)?)
}

/// Creates a test app from a JSON settings file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or invalid.
pub async fn from_file(path: impl AsRef<Path>) -> Result<LiveTestApp, LiveTestError> {
    let path = path.as_ref();
    let settings = SettingsRepository::new(path)
        .load()
        .await?
        .ok_or_else(|| {
            SettingsError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("settings file not found: {}", path.display()),
            ))
        })?;
    Ok(from_settings(&settings)?)
}
