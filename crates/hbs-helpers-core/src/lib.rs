//! # hbs-helpers-core
//!
//! Foundation crate for the hbs-helpers workspace. This crate has no knowledge
//! of any individual helper; it provides the pieces every helper group is
//! built from:
//!
//! - [`error`] - the [`HelperError`] type and its conversion into the engine's
//!   `RenderError`
//! - [`value`] - coercion and comparison rules for the JSON values helpers
//!   receive (display rendering, lenient numeric parsing, loose/strict
//!   equality, truthiness)
//! - [`text`] - the shared casing machinery (`chop`, `change_case`) behind the
//!   string helpers
//! - [`convention`] - the trailing-metadata invocation convention: deciding
//!   between block, inline, and subexpression behavior for a computed value

pub mod convention;
pub mod error;
pub mod text;
pub mod value;

// Re-export the most commonly used items at the crate root.
pub use convention::{Conditional, Inline, TestHelper, ValueHelper};
pub use error::HelperError;
