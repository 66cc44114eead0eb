use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use strum::IntoEnumIterator;

use crate::error::Error;
use crate::sentinel::Sentinel;

/// One independently flaggable reason a token failed validation.
///
/// The declaration order fixes the bit position of each category and must
/// never change: `Malformed` is bit 0, `ClaimsInvalid` is bit 9.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
    strum_macros::VariantNames,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Token is structurally unparsable.
    Malformed,
    /// Signature check could not be attempted (signing problems).
    Unverifiable,
    SignatureInvalid,
    /// `aud` claim check failed.
    AudienceInvalid,
    /// `exp` claim is in the past.
    Expired,
    /// `iat` claim check failed.
    IssuedAtInvalid,
    /// `iss` claim check failed.
    IssuerInvalid,
    /// `nbf` claim is in the future.
    NotValidYet,
    /// `jti` claim check failed.
    IdInvalid,
    ClaimsInvalid,
}

impl ErrorCategory {
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Mask-backed sentinel for this category, if one is published.
    pub const fn sentinel(self) -> Option<Sentinel> {
        match self {
            Self::Malformed => Some(Sentinel::TokenMalformed),
            Self::Unverifiable => Some(Sentinel::TokenUnverifiable),
            Self::SignatureInvalid => Some(Sentinel::TokenSignatureInvalid),
            Self::Expired => Some(Sentinel::TokenExpired),
            Self::NotValidYet => Some(Sentinel::TokenNotValidYet),
            Self::AudienceInvalid
            | Self::IssuedAtInvalid
            | Self::IssuerInvalid
            | Self::IdInvalid
            | Self::ClaimsInvalid => None,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, Error> {
        name.parse::<Self>().map_err(|_| Error::UnknownCategory {
            name: name.to_string(),
        })
    }
}

const KNOWN_BITS: u32 = (1 << 10) - 1;

/// Set of [`ErrorCategory`] values backed by a `u32`.
///
/// Only union is supported; validators add reasons as they find them and
/// never clear one. A zero mask means the token passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ErrorMask(u32);

impl ErrorMask {
    pub const NONE: Self = Self(0);

    /// Bits outside the known categories are kept, so a mask produced by a
    /// newer validator never reads as valid here.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, category: ErrorCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub const fn with(self, category: ErrorCategory) -> Self {
        Self(self.0 | category.bit())
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, category: ErrorCategory) {
        self.0 |= category.bit();
    }

    /// Known categories present in the mask, in bit order.
    pub fn categories(self) -> impl Iterator<Item = ErrorCategory> {
        ErrorCategory::iter().filter(move |c| self.contains(*c))
    }

    fn unknown_bits(self) -> u32 {
        self.0 & !KNOWN_BITS
    }
}

impl From<ErrorCategory> for ErrorMask {
    fn from(category: ErrorCategory) -> Self {
        Self(category.bit())
    }
}

impl FromIterator<ErrorCategory> for ErrorMask {
    fn from_iter<I: IntoIterator<Item = ErrorCategory>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl BitOr for ErrorMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOr<ErrorCategory> for ErrorMask {
    type Output = Self;

    fn bitor(self, rhs: ErrorCategory) -> Self {
        self.with(rhs)
    }
}

impl BitOr for ErrorCategory {
    type Output = ErrorMask;

    fn bitor(self, rhs: Self) -> ErrorMask {
        ErrorMask::from(self).with(rhs)
    }
}

impl BitOrAssign<ErrorCategory> for ErrorMask {
    fn bitor_assign(&mut self, rhs: ErrorCategory) {
        self.insert(rhs);
    }
}

impl BitOrAssign for ErrorMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for ErrorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut parts: Vec<String> = self.categories().map(|c| c.to_string()).collect();
        let unknown = self.unknown_bits();
        if unknown != 0 {
            parts.push(format!("unknown({unknown:#x})"));
        }
        f.write_str(&parts.join("|"))
    }
}
