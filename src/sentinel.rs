use crate::category::ErrorCategory;

/// Well-known errors that callers compare a [`ValidationError`] against.
///
/// Sentinels carry no state. Five of them are backed by a mask bit; the
/// three key/hash sentinels describe dependency failures and only ever show
/// up as a wrapped cause, so they never match a mask.
///
/// [`ValidationError`]: crate::ValidationError
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    #[error("key is invalid")]
    InvalidKey,

    #[error("key is of invalid type")]
    InvalidKeyType,

    #[error("the requested hash function is unavailable")]
    HashUnavailable,

    #[error("token is malformed")]
    TokenMalformed,

    #[error("token could not be verified because of signing problems")]
    TokenUnverifiable,

    #[error("token signature is invalid")]
    TokenSignatureInvalid,

    #[error("token is expired")]
    TokenExpired,

    #[error("token is not valid yet")]
    TokenNotValidYet,
}

impl Sentinel {
    pub const ALL: [Self; 8] = [
        Self::InvalidKey,
        Self::InvalidKeyType,
        Self::HashUnavailable,
        Self::TokenMalformed,
        Self::TokenUnverifiable,
        Self::TokenSignatureInvalid,
        Self::TokenExpired,
        Self::TokenNotValidYet,
    ];

    /// Mask category backing this sentinel; `None` for dependency-level ones.
    pub const fn category(self) -> Option<ErrorCategory> {
        match self {
            Self::TokenMalformed => Some(ErrorCategory::Malformed),
            Self::TokenUnverifiable => Some(ErrorCategory::Unverifiable),
            Self::TokenSignatureInvalid => Some(ErrorCategory::SignatureInvalid),
            Self::TokenExpired => Some(ErrorCategory::Expired),
            Self::TokenNotValidYet => Some(ErrorCategory::NotValidYet),
            Self::InvalidKey | Self::InvalidKeyType | Self::HashUnavailable => None,
        }
    }
}
