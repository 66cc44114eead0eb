#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod category;
pub mod error;
pub mod sentinel;
pub mod validation;

pub use category::{ErrorCategory, ErrorMask};
pub use error::Error;
pub use sentinel::Sentinel;
pub use validation::{BoxError, FALLBACK_TEXT, ValidationError, matches_sentinel};
