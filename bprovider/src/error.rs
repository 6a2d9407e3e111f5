//! Shared provider error kinds and error value helpers.
//!
//! ```rust
//! use bprovider::{ProviderError, ProviderErrorKind};
//!
//! let status = ProviderError::http_status(401, "bad key");
//! assert_eq!(status.kind, ProviderErrorKind::HttpStatus(401));
//!
//! let offline = ProviderError::unavailable("connection refused");
//! assert_eq!(offline.kind, ProviderErrorKind::Unavailable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    HttpStatus(u16),
    Malformed,
    Unavailable,
    Authentication,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn http_status(code: u16, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::HttpStatus(code), message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Malformed, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProviderError {}
