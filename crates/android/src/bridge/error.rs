//! Bridge failures and their wire form

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a bridge call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A required call parameter is missing or has the wrong type
    #[error("{0}")]
    InvalidArgument(String),

    /// A referenced file is absent
    #[error("{0}")]
    NotFound(String),

    /// No activity can service the launch intent
    #[error("{0}")]
    NoHandler(String),

    /// The host platform reported an error
    #[error("{message}")]
    Platform {
        message: String,
        details: Option<String>,
    },

    /// Unknown channel or method
    #[error("Method not implemented: {0}")]
    NotImplemented(String),
}

impl BridgeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NoHandler(_) => "NO_HANDLER",
            Self::Platform { .. } => "PLATFORM_ERROR",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Platform { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    /// The `(code, message, details)` triple returned to the caller
    pub fn to_failure(&self) -> BridgeFailure {
        BridgeFailure {
            code: self.code().to_string(),
            message: self.to_string(),
            details: self.details().map(String::from),
        }
    }
}

/// Serializable failure triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeFailure {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_triple() {
        let err = BridgeError::Platform {
            message: "Failed to get installer package name".into(),
            details: Some("SecurityException".into()),
        };
        let failure = err.to_failure();

        assert_eq!(failure.code, "PLATFORM_ERROR");
        assert_eq!(failure.message, "Failed to get installer package name");
        assert_eq!(failure.details.as_deref(), Some("SecurityException"));
    }

    #[test]
    fn test_failure_serialization_omits_empty_details() {
        let json = serde_json::to_string(&BridgeError::NoHandler("none".into()).to_failure()).unwrap();
        assert_eq!(json, r#"{"code":"NO_HANDLER","message":"none"}"#);
    }
}
