use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,
    #[error("invalid token")]
    InvalidToken,
}

/// Identity attached to a request once its credential checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

/// Pluggable credential check. The download pipeline only sees this trait,
/// so token introspection or signature verification can replace the static
/// check without touching handlers.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> Result<Principal, AuthError>;
}

/// Placeholder verifier: accepts exactly one configured token.
///
/// Not suitable for production. Swap in a real issuer-backed verifier.
pub struct StaticTokenVerifier {
    expected: String,
}

impl StaticTokenVerifier {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl CredentialVerifier for StaticTokenVerifier {
    fn verify(&self, credential: &str) -> Result<Principal, AuthError> {
        if credential.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if self.expected.is_empty() || credential != self.expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(Principal {
            subject: "static-token".to_string(),
        })
    }
}
