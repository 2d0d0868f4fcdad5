//! Credential configuration for remote operations.
//!
//! Credentials are injected into the engine at construction rather than
//! read from ambient global state, so working copies with different
//! credentials can coexist in one process. Absence of a token means
//! anonymous operation: remote calls proceed without credentials and fail
//! only if the remote rejects them.

use std::fs;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use skiff_git::Credentials;

use crate::error::{Error, Result};

/// Username presented to the remote when only a token is configured.
///
/// GitHub accepts any non-empty username with a PAT; this sentinel is the
/// documented convention.
pub const DEFAULT_TOKEN_USERNAME: &str = "x-access-token";

/// Environment variable holding the remote username.
pub const USERNAME_VAR: &str = "GIT_AUTH_USERNAME";

/// Environment variable holding the access token.
pub const TOKEN_VAR: &str = "GIT_AUTH_TOKEN";

/// Credential configuration for the sync engine.
#[derive(Debug, Default)]
pub struct AuthConfig {
    username: Option<String>,
    token: Option<SecretString>,
}

impl AuthConfig {
    /// Create a config from optional username and token.
    ///
    /// Blank values are treated as unset.
    #[must_use]
    pub fn new(username: Option<String>, token: Option<String>) -> Self {
        Self {
            username: username.filter(|u| !u.trim().is_empty()),
            token: token
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from),
        }
    }

    /// Resolve credentials from `GIT_AUTH_USERNAME` / `GIT_AUTH_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(USERNAME_VAR).ok(),
            std::env::var(TOKEN_VAR).ok(),
        )
    }

    /// Load credentials from a TOML file with an `[auth]` section.
    ///
    /// A missing file yields the anonymous default.
    ///
    /// # Errors
    /// Returns [`Error::LocalIo`] if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::LocalIo(format!("read {}: {e}", path.display())))?;
        let file: AuthFile = toml::from_str(&content)
            .map_err(|e| Error::LocalIo(format!("parse {}: {e}", path.display())))?;
        Ok(Self::new(file.auth.username, file.auth.token))
    }

    /// Whether a token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Resolve the credential pair for one operation.
    ///
    /// Returns `None` when no token is configured, meaning the operation
    /// runs anonymously.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.token.as_ref().map(|token| {
            let username = self
                .username
                .clone()
                .unwrap_or_else(|| DEFAULT_TOKEN_USERNAME.to_owned());
            Credentials::new(username, token.expose_secret())
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct AuthFile {
    #[serde(default)]
    auth: AuthSection,
}

#[derive(Debug, Default, Deserialize)]
struct AuthSection {
    username: Option<String>,
    token: Option<String>,
}
