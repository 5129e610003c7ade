//! Session credentials for the upstream token endpoint.
//!
//! # Design Decisions
//! - Loaded once at process start, immutable for the process lifetime
//! - Passed into the server at construction, never read from ambient
//!   globals inside a handler (tests inject arbitrary values)
//! - Never logged: `Debug` redacts both values

use std::env;
use std::fmt;

/// The two opaque session identifiers the token endpoint requires.
pub struct CredentialBundle {
    visitor: String,
    visit: String,
}

impl CredentialBundle {
    /// Create a bundle from explicit values.
    pub fn new(visitor: impl Into<String>, visit: impl Into<String>) -> Self {
        Self {
            visitor: visitor.into(),
            visit: visit.into(),
        }
    }

    /// Read `AHOY_VISITOR` and `AHOY_VISIT` from the environment.
    ///
    /// Missing variables become empty strings; the upstream then rejects
    /// the token request with 403 on its own.
    pub fn from_env() -> Self {
        Self {
            visitor: env::var("AHOY_VISITOR").unwrap_or_default(),
            visit: env::var("AHOY_VISIT").unwrap_or_default(),
        }
    }

    /// Render the `Cookie` header value for the token request.
    pub fn cookie_header(&self) -> String {
        format!(
            "ahoy_visitor={}; ahoy_visit={};",
            self.visitor, self.visit
        )
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("visitor", &"<redacted>")
            .field("visit", &"<redacted>")
            .finish()
    }
}
