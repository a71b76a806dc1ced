//! Caller identity as seen by the core.
//!
//! Token issuance and verification live in the user directory; by the time a
//! request reaches the core it is either anonymous or carries a user ID.

use thiserror::Error;

use crate::types::UserId;

/// Raised when an anonymous caller invokes an identity-scoped operation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("authentication credentials were not provided")]
    NotAuthenticated,
}

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User(UserId),
}

impl Caller {
    /// Builds a caller from an optional user ID; missing or blank is anonymous.
    pub fn from_user_id(id: Option<&str>) -> Self {
        id.and_then(|id| UserId::new(id).ok())
            .map_or(Self::Anonymous, Self::User)
    }

    /// The caller's identity, or an error for anonymous callers.
    pub const fn require_user(&self) -> Result<&UserId, AuthorizationError> {
        match self {
            Self::User(id) => Ok(id),
            Self::Anonymous => Err(AuthorizationError::NotAuthenticated),
        }
    }

    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}
