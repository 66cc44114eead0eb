use std::borrow::Cow;
use std::fmt;

use crate::category::{ErrorCategory, ErrorMask};
use crate::sentinel::Sentinel;

/// Opaque failure reported by a dependency such as a key lookup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Text reported when neither a cause nor a message is available.
pub const FALLBACK_TEXT: &str = "token is invalid";

/// Aggregate of every reason a single token failed validation.
///
/// A validator builds one of these per token, flags each category that
/// fired, optionally attaches the dependency error that stopped it, and
/// then hands it to the caller, which only reads it.
///
/// Validity is decided by the mask alone. An instance with an empty mask is
/// valid even when it carries a cause or a message; this mirrors how
/// existing validators consume the type and is kept as is.
#[derive(Debug, Default)]
pub struct ValidationError {
    cause: Option<BoxError>,
    mask: ErrorMask,
    message: Option<String>,
}

impl ValidationError {
    /// An empty `message` is stored as no message at all.
    pub fn new(message: impl Into<String>, mask: ErrorMask) -> Self {
        let message = message.into();
        Self {
            cause: None,
            mask,
            message: (!message.is_empty()).then_some(message),
        }
    }

    pub fn from_category(category: ErrorCategory) -> Self {
        Self::default().with_category(category)
    }

    /// Wraps a dependency failure. No category is implied; pass
    /// [`ErrorCategory::Unverifiable`] in `mask` if the failure prevented
    /// signature verification.
    pub fn from_cause(cause: impl Into<BoxError>, mask: ErrorMask) -> Self {
        Self::default().with_mask(mask).with_cause(cause)
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.set_cause(cause);
        self
    }

    pub fn with_category(mut self, category: ErrorCategory) -> Self {
        self.add_category(category);
        self
    }

    pub fn with_mask(mut self, mask: ErrorMask) -> Self {
        self.mask |= mask;
        self
    }

    pub fn add_category(&mut self, category: ErrorCategory) {
        tracing::trace!(category = %category, "flagged token validation failure");
        self.mask.insert(category);
    }

    /// Replaces any previously attached cause.
    pub fn set_cause(&mut self, cause: impl Into<BoxError>) {
        let cause = cause.into();
        tracing::trace!(cause = %cause, "attached dependency failure");
        self.cause = Some(cause);
    }

    pub fn mask(&self) -> ErrorMask {
        self.mask
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn has_category(&self, category: ErrorCategory) -> bool {
        self.mask.contains(category)
    }

    /// True iff no category fired.
    pub fn is_valid(&self) -> bool {
        self.mask.is_empty()
    }

    /// Most specific text available: the cause's own text, then the custom
    /// message, then [`FALLBACK_TEXT`]. The mask is never rendered.
    pub fn error_text(&self) -> Cow<'_, str> {
        if let Some(cause) = &self.cause {
            Cow::Owned(cause.to_string())
        } else if let Some(message) = &self.message {
            Cow::Borrowed(message.as_str())
        } else {
            Cow::Borrowed(FALLBACK_TEXT)
        }
    }

    /// Whether the mask carries the category behind `target`.
    ///
    /// Dependency-level sentinels never match here; compare them against
    /// [`cause`](Self::cause) instead.
    pub fn is(&self, target: Sentinel) -> bool {
        match target {
            Sentinel::TokenMalformed => self.mask.contains(ErrorCategory::Malformed),
            Sentinel::TokenUnverifiable => self.mask.contains(ErrorCategory::Unverifiable),
            Sentinel::TokenSignatureInvalid => {
                self.mask.contains(ErrorCategory::SignatureInvalid)
            }
            Sentinel::TokenExpired => self.mask.contains(ErrorCategory::Expired),
            Sentinel::TokenNotValidYet => self.mask.contains(ErrorCategory::NotValidYet),
            Sentinel::InvalidKey | Sentinel::InvalidKeyType | Sentinel::HashUnavailable => false,
        }
    }
}

/// Category-identity check that also covers the "no error" case.
///
/// `None` on either side stands for "no error": an absent error matches
/// only an absent target, and a present error never matches an absent
/// target, even when its mask is empty.
pub fn matches_sentinel(error: Option<&ValidationError>, target: Option<Sentinel>) -> bool {
    match (error, target) {
        (None, target) => target.is_none(),
        (Some(_), None) => false,
        (Some(error), Some(target)) => error.is(target),
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_text())
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn new_stores_message_and_mask_without_cause() {
        let err = ValidationError::new("bad claims", ErrorCategory::ClaimsInvalid.into());
        assert!(err.cause().is_none());
        assert_eq!(err.message(), Some("bad claims"));
        assert_eq!(err.mask(), ErrorMask::from(ErrorCategory::ClaimsInvalid));
    }

    #[test]
    fn empty_message_is_treated_as_absent() {
        let err = ValidationError::new("", ErrorMask::NONE);
        assert_eq!(err.message(), None);
        assert_eq!(err.error_text(), FALLBACK_TEXT);
    }

    #[test]
    fn signature_and_expiry_scenario() {
        let err = ValidationError::new(
            "",
            ErrorCategory::SignatureInvalid | ErrorCategory::Expired,
        );
        assert!(!err.is_valid());
        assert!(err.is(Sentinel::TokenSignatureInvalid));
        assert!(err.is(Sentinel::TokenExpired));
        assert!(!err.is(Sentinel::TokenMalformed));
        assert_eq!(err.error_text(), "token is invalid");
        assert_eq!(err.to_string(), "token is invalid");
    }

    #[test]
    fn zero_mask_with_cause_is_still_valid() {
        let err = ValidationError::from_cause(Sentinel::InvalidKey, ErrorMask::NONE);
        assert!(err.is_valid());
        assert_eq!(err.error_text(), "key is invalid");
    }

    #[test]
    fn zero_mask_with_message_is_still_valid() {
        let err = ValidationError::new("looks wrong", ErrorMask::NONE);
        assert!(err.is_valid());
        assert_eq!(err.error_text(), "looks wrong");
    }

    #[test]
    fn cause_text_wins_over_message_and_mask() {
        let err = ValidationError::new("custom", ErrorCategory::Malformed.into())
            .with_cause(std::io::Error::other("key lookup failed"));
        assert_eq!(err.error_text(), "key lookup failed");
    }

    #[test]
    fn message_wins_over_fallback_regardless_of_mask() {
        let err = ValidationError::new("audience mismatch", ErrorCategory::AudienceInvalid.into());
        assert_eq!(err.error_text(), "audience mismatch");
    }

    #[test]
    fn builder_accumulates_categories() {
        let mut err = ValidationError::from_category(ErrorCategory::IssuerInvalid)
            .with_mask(ErrorCategory::IdInvalid | ErrorCategory::Expired);
        err.add_category(ErrorCategory::NotValidYet);

        assert!(err.has_category(ErrorCategory::IssuerInvalid));
        assert!(err.has_category(ErrorCategory::IdInvalid));
        assert!(err.is(Sentinel::TokenExpired));
        assert!(err.is(Sentinel::TokenNotValidYet));
        assert!(!err.is(Sentinel::TokenUnverifiable));
    }

    #[test]
    fn dependency_sentinels_never_match_mask() {
        let err = ValidationError::from_cause(
            Sentinel::HashUnavailable,
            ErrorMask::from_bits(u32::MAX),
        );
        assert!(!err.is(Sentinel::InvalidKey));
        assert!(!err.is(Sentinel::InvalidKeyType));
        assert!(!err.is(Sentinel::HashUnavailable));
    }

    #[test]
    fn source_exposes_cause() {
        let err = ValidationError::from_cause(
            Sentinel::InvalidKeyType,
            ErrorCategory::Unverifiable.into(),
        );
        let source = err.source().unwrap();
        assert_eq!(
            source.downcast_ref::<Sentinel>(),
            Some(&Sentinel::InvalidKeyType)
        );
        assert!(ValidationError::default().source().is_none());
    }

    #[test]
    fn set_cause_replaces_previous_cause() {
        let mut err = ValidationError::from_cause(Sentinel::InvalidKey, ErrorMask::NONE);
        err.set_cause(Sentinel::HashUnavailable);
        assert_eq!(err.error_text(), Sentinel::HashUnavailable.to_string());
    }

    #[test]
    fn absent_error_matches_only_absent_target() {
        assert!(matches_sentinel(None, None));
        for sentinel in Sentinel::ALL {
            assert!(!matches_sentinel(None, Some(sentinel)));
        }
    }

    #[test]
    fn present_error_never_matches_absent_target() {
        let empty = ValidationError::default();
        assert!(!matches_sentinel(Some(&empty), None));
        for sentinel in Sentinel::ALL {
            assert!(!matches_sentinel(Some(&empty), Some(sentinel)));
        }

        let expired = ValidationError::from_category(ErrorCategory::Expired);
        assert!(!matches_sentinel(Some(&expired), None));
        assert!(matches_sentinel(Some(&expired), Some(Sentinel::TokenExpired)));
    }
}
