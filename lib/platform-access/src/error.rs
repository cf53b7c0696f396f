//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause: callers wrap
//! these in a `Report` and add layer-appropriate context as they
//! propagate toward the HTTP boundary.

use std::fmt;

/// Errors from authentication operations.
///
/// These errors represent failures in verifying user identity against
/// the WeChat open platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The identity provider rejected the request.
    ProviderError { provider: String, reason: String },
    /// A required field was missing from the provider's token grant.
    MissingGrantField { field: String },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderError { provider, reason } => {
                write!(f, "provider '{provider}' error: {reason}")
            }
            Self::MissingGrantField { field } => {
                write!(f, "missing field in token grant: {field}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_display() {
        let err = AuthenticationError::ProviderError {
            provider: "wechat".to_string(),
            reason: "errcode 40029: invalid code".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "provider 'wechat' error: errcode 40029: invalid code"
        );
    }

    #[test]
    fn missing_grant_field_display() {
        let err = AuthenticationError::MissingGrantField {
            field: "openid".to_string(),
        };
        assert_eq!(err.to_string(), "missing field in token grant: openid");
    }
}
