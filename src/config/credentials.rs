use crate::utils::error::{AnnotateError, Result};
use std::fmt;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Bearer token for the vision service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Loads `.env` from the working directory or one of its parents, then
    /// reads the key from the process environment.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => {
                return Err(AnnotateError::ConfigError {
                    message: format!("failed to read .env file: {}", e),
                })
            }
        }

        Self::resolve(|name| std::env::var(name).ok())
    }

    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_KEY_VAR) {
            Some(key) if !key.trim().is_empty() => Ok(Self(key.trim().to_string())),
            _ => Err(AnnotateError::MissingConfigError {
                field: API_KEY_VAR.to_string(),
            }),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}
