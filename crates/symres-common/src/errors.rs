//! Registration errors.
//!
//! Resolution misses are plain data (`None`); only configuration mistakes
//! discovered at registration time are errors.

/// Error raised while registering prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A non-empty hierarchical prefix did not end with the namespace
    /// separator.
    InvalidPrefix {
        /// The rejected prefix
        prefix: String,
    },
}

impl RegistrationError {
    pub fn invalid_prefix(prefix: impl Into<String>) -> Self {
        RegistrationError::InvalidPrefix {
            prefix: prefix.into(),
        }
    }

    /// The prefix involved in the failed registration.
    pub fn prefix(&self) -> &str {
        match self {
            RegistrationError::InvalidPrefix { prefix } => prefix,
        }
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::InvalidPrefix { prefix } => write!(
                f,
                "A non-empty PSR-4 prefix must end with a namespace separator. (got `{}`)",
                prefix
            ),
        }
    }
}

impl std::error::Error for RegistrationError {}
