//! Branch name validation and newtype.
//!
//! The engine is typically driven by external orchestration (an automated
//! fix loop), so branch names arrive as untrusted strings. [`BranchName`]
//! enforces git's naming rules and rejects traversal or shell
//! metacharacters before any name reaches the VCS layer.

use std::fmt;

use crate::error::Error;

/// A validated git branch name.
///
/// # Examples
///
/// ```
/// use skiff_core::BranchName;
///
/// let name = BranchName::new("hotfix_20250101_000001").unwrap();
/// assert_eq!(name.as_str(), "hotfix_20250101_000001");
///
/// assert!(BranchName::new("../etc/passwd").is_err());
/// assert!(BranchName::new("name;rm -rf").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBranchName`] if the name violates git's
    /// branch naming rules or contains dangerous characters.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if let Some(reason) = invalid_reason(&name) {
            return Err(Error::InvalidBranchName { name, reason });
        }
        Ok(Self(name))
    }

    /// Generate a timestamped branch name, e.g. `hotfix_20250101_000001`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBranchName`] if `prefix` itself is not a
    /// valid branch name fragment.
    pub fn timestamped(prefix: &str) -> Result<Self, Error> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Self::new(format!("{prefix}_{stamp}"))
    }

    /// Get the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the `BranchName` and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for BranchName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Why `name` is not a valid branch name, or `None` if it is.
fn invalid_reason(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("branch name cannot be empty".to_owned());
    }
    if name == "@" {
        return Some("branch name cannot be '@'".to_owned());
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Some("branch name cannot start or end with '.'".to_owned());
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Some("branch name cannot start or end with '/'".to_owned());
    }
    if name.starts_with('-') {
        return Some("branch name cannot start with '-'".to_owned());
    }
    if name.ends_with(".lock") {
        return Some("branch name cannot end with '.lock'".to_owned());
    }
    if name.contains("..") || name.contains("//") || name.contains("@{") {
        return Some("branch name cannot contain '..', '//' or '@{'".to_owned());
    }

    for c in name.chars() {
        if c.is_ascii_control() {
            return Some("branch name cannot contain control characters".to_owned());
        }
        // Forbidden by git: space ~ ^ : ? * [ \
        // Rejected for shell safety: $ ; | & > < ` " ' ( ) { } !
        if matches!(
            c,
            ' ' | '~'
                | '^'
                | ':'
                | '?'
                | '*'
                | '['
                | '\\'
                | '$'
                | ';'
                | '|'
                | '&'
                | '>'
                | '<'
                | '`'
                | '"'
                | '\''
                | '('
                | ')'
                | '{'
                | '}'
                | '!'
        ) {
            return Some(format!("branch name cannot contain '{c}'"));
        }
    }

    None
}
