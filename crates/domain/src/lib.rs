//! LiveTest Domain - Core test types
//!
//! This crate defines the request, response and session model used to
//! drive a live site from functional tests.
//! All types here are pure Rust with no I/O dependencies.

pub mod cookie;
pub mod error;
pub mod navigation;
pub mod request;
pub mod response;
pub mod scheme;
pub mod settings;
pub mod testing;

pub use self::cookie::{CookieJar, SetCookie};
pub use error::{DomainError, DomainResult};
pub use navigation::{NavigationMethod, resolve_target};
pub use request::{Header, Headers, HttpMethod, RequestBody, TestRequest};
pub use response::TestResponse;
pub use scheme::Scheme;
pub use settings::LiveTestSettings;
pub use testing::StatusExpectation;
