//! # hbs-helpers
//!
//! A batteries-included collection of helpers for the [handlebars] template
//! engine, organized into groups that can be registered together or one at a
//! time:
//!
//! - [`string`] - casing, trimming, truncation, and other text manipulation
//! - [`array`] - slicing, sorting, filtering, and block iteration over lists
//! - [`collection`] - helpers that work on arrays and objects alike
//! - [`comparison`] - equality, ordering, and boolean logic
//! - [`math`] - arithmetic over numbers and numeric strings
//! - [`number`] - number formatting (commas, bytes, precision, abbreviation)
//! - [`object`] - property access, merging, picking, and JSON conversion
//! - [`path`] - file path dissection and resolution
//! - [`url`] - URL encoding, parsing, and resolution
//! - [`html`] - attribute, list, and sanitization helpers
//! - [`matching`] - glob matching over lists and values
//! - [`regex`] - regular expression construction and testing
//! - [`fs`] - reading files and listing directories
//! - [`code`] - embedding source files, gists, and jsfiddles
//! - [`uuid`] - random identifier generation
//! - [`i18n`] - language table lookup
//! - [`inflection`] - pluralization and ordinal suffixes
//! - [`misc`] - odds and ends: `noop`, `option`, `typeOf`, `withHash`
//!
//! # Usage
//!
//! ```
//! use handlebars::Handlebars;
//! use serde_json::json;
//!
//! let mut hb = Handlebars::new();
//! hbs_helpers::register_all(&mut hb);
//!
//! let out = hb
//!     .render_template("{{capitalize (first names)}}", &json!({"names": ["ana", "bo"]}))
//!     .unwrap();
//! assert_eq!(out, "Ana");
//! ```
//!
//! Every helper accepts trailing metadata in the conventional handlebars
//! forms: named hash arguments (`{{truncate text 8 suffix="…"}}`) and, for
//! conditionals and iterators, a block body with an optional `{{else}}`
//! section.

use handlebars::Handlebars;

pub mod array;
pub mod code;
pub mod collection;
pub mod comparison;
pub mod fs;
pub mod html;
pub mod i18n;
pub mod inflection;
pub mod matching;
pub mod math;
pub mod misc;
pub mod number;
pub mod object;
pub mod path;
pub mod regex;
pub mod string;
pub mod url;
pub mod uuid;

pub use hbs_helpers_core::{Conditional, HelperError, Inline, TestHelper, ValueHelper};

/// Registers every helper group on the given registry.
pub fn register_all(hb: &mut Handlebars<'_>) {
    array::register(hb);
    code::register(hb);
    collection::register(hb);
    comparison::register(hb);
    fs::register(hb);
    html::register(hb);
    i18n::register(hb);
    inflection::register(hb);
    matching::register(hb);
    math::register(hb);
    misc::register(hb);
    number::register(hb);
    object::register(hb);
    path::register(hb);
    regex::register(hb);
    string::register(hb);
    url::register(hb);
    uuid::register(hb);
    tracing::debug!("registered all helper groups");
}
