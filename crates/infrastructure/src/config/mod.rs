//! Settings from the process environment.

mod env;

pub use env::{
    ACCEPT_INVALID_CERTS_VAR, BASE_URL_VAR, HOST_VAR, SCHEME_VAR, TIMEOUT_MS_VAR, USER_AGENT_VAR,
    settings_from_env, settings_from_lookup,
};
