//! Coercion and comparison rules for helper arguments.
//!
//! Helpers receive `serde_json::Value`s from the engine, but the behavior
//! users expect is looser than JSON: numeric strings compare as numbers,
//! "no"-like words count as falsey, and inline output renders `3`, not `3.0`.
//! This module is the single place those rules live.

use std::cmp::Ordering;

use serde_json::Value as Json;

/// Words treated as falsey in addition to ordinary falsey values.
///
/// Mirrors the word list used by `isFalsey`/`isTruthy`, so that e.g. a
/// front-matter value of `"no"` behaves like `false`.
const FALSEY_WORDS: &[&str] = &[
    "0", "false", "nada", "nil", "nay", "nah", "negative", "no", "none", "nope", "nul", "null",
    "nix", "nyet", "uh-uh", "veto", "zero",
];

/// Renders a JSON value the way inline helper output should look: strings
/// verbatim, `null` as the empty string, arrays comma-joined, objects as
/// compact JSON text.
pub fn render_string(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => n.to_string(),
        Json::String(s) => s.clone(),
        Json::Array(items) => items.iter().map(render_string).collect::<Vec<_>>().join(","),
        Json::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Lenient numeric coercion: numbers pass through, numeric strings parse,
/// booleans coerce to `1`/`0`. Everything else is `None`.
pub fn as_f64(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok(),
        Json::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Converts a computed float back into JSON, collapsing integral results to
/// integers so inline output prints `3` rather than `3.0`. Non-finite values
/// become `null`.
pub fn num_to_json(n: f64) -> Json {
    if !n.is_finite() {
        return Json::Null;
    }
    #[allow(clippy::cast_possible_truncation)]
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Json::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
    }
}

/// Plain truthiness: `null` and `false` are falsey, as are `0` and the empty
/// string; arrays and objects are always truthy.
pub fn truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

/// Extended falsey test: everything [`truthy`] rejects, plus the
/// [`FALSEY_WORDS`] list (case-insensitive).
pub fn falsey(value: &Json) -> bool {
    if !truthy(value) {
        return true;
    }
    match value {
        Json::String(s) => {
            let lowered = s.to_lowercase();
            FALSEY_WORDS.contains(&lowered.as_str())
        }
        _ => false,
    }
}

/// Emptiness as collections see it: `null`, `""`, `[]` and `{}` are empty;
/// numbers and booleans never are.
pub fn is_empty(value: &Json) -> bool {
    match value {
        Json::Null => true,
        Json::Bool(_) | Json::Number(_) => false,
        Json::String(s) => s.is_empty(),
        Json::Array(items) => items.is_empty(),
        Json::Object(map) => map.is_empty(),
    }
}

/// Length of a string (in characters), array, or object. `None` for scalars.
pub fn len_of(value: &Json) -> Option<usize> {
    match value {
        Json::String(s) => Some(s.chars().count()),
        Json::Array(items) => Some(items.len()),
        Json::Object(map) => Some(map.len()),
        _ => None,
    }
}

/// JavaScript-flavored `typeof` names, as the `typeOf` helper and the
/// `compare` helper's `typeof` operator report them. A missing argument is
/// `"undefined"`; `null`, arrays and objects are all `"object"`.
pub fn type_of(value: Option<&Json>) -> &'static str {
    match value {
        None => "undefined",
        Some(Json::Bool(_)) => "boolean",
        Some(Json::Number(_)) => "number",
        Some(Json::String(_)) => "string",
        Some(Json::Null | Json::Array(_) | Json::Object(_)) => "object",
    }
}

/// Strict equality (`===`): values must match exactly, except that numbers
/// compare by value so `3` equals `3.0`.
pub fn strict_eq(a: &Json, b: &Json) -> bool {
    match (a, b) {
        (Json::Number(x), Json::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Loose equality (`==`): strict equality, or equality after numeric
/// coercion, so `"3"` equals `3` and `true` equals `1`.
pub fn loose_eq(a: &Json, b: &Json) -> bool {
    if strict_eq(a, b) {
        return true;
    }
    match (as_f64(a), as_f64(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Ordering for the relational operators: numeric when both sides coerce to
/// numbers, lexicographic when both are strings, undefined otherwise.
pub fn compare(a: &Json, b: &Json) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (as_f64(a), as_f64(b)) {
        return x.partial_cmp(&y);
    }
    if let (Json::String(x), Json::String(y)) = (a, b) {
        return Some(x.cmp(y));
    }
    None
}

/// Resolves a dot-delimited property path (`a.b.0.c`) against a value,
/// traversing objects by key and arrays by index.
pub fn get_path<'a>(value: &'a Json, path: &str) -> Option<&'a Json> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Json::Object(map) => map.get(segment)?,
            Json::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Rendering ───────────────────────────────────────────────────

    #[test]
    fn test_render_string_scalars() {
        assert_eq!(render_string(&json!(null)), "");
        assert_eq!(render_string(&json!(true)), "true");
        assert_eq!(render_string(&json!(42)), "42");
        assert_eq!(render_string(&json!("abc")), "abc");
    }

    #[test]
    fn test_render_string_array_joins_with_commas() {
        assert_eq!(render_string(&json!(["a", "b", "c"])), "a,b,c");
        assert_eq!(render_string(&json!([1, 2, 3])), "1,2,3");
    }

    #[test]
    fn test_render_string_object_is_json_text() {
        assert_eq!(render_string(&json!({"a": 1})), r#"{"a":1}"#);
    }

    // ── Numeric coercion ────────────────────────────────────────────

    #[test]
    fn test_as_f64_lenient() {
        assert_eq!(as_f64(&json!(2)), Some(2.0));
        assert_eq!(as_f64(&json!("2.5")), Some(2.5));
        assert_eq!(as_f64(&json!(" 7 ")), Some(7.0));
        assert_eq!(as_f64(&json!(true)), Some(1.0));
        assert_eq!(as_f64(&json!("abc")), None);
        assert_eq!(as_f64(&json!([1])), None);
    }

    #[test]
    fn test_num_to_json_collapses_integral_floats() {
        assert_eq!(num_to_json(3.0), json!(3));
        assert_eq!(num_to_json(3.5), json!(3.5));
        assert_eq!(num_to_json(-0.0), json!(0));
        assert_eq!(num_to_json(f64::NAN), Json::Null);
    }

    // ── Truthiness ──────────────────────────────────────────────────

    #[test]
    fn test_truthy() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("no"))); // plain truthiness, not the word list
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
    }

    #[test]
    fn test_falsey_word_list() {
        assert!(falsey(&json!("no")));
        assert!(falsey(&json!("FALSE")));
        assert!(falsey(&json!("nope")));
        assert!(falsey(&json!("")));
        assert!(!falsey(&json!("yes")));
        assert!(!falsey(&json!(12)));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&json!(null)));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!([1])));
    }

    // ── Equality and ordering ───────────────────────────────────────

    #[test]
    fn test_strict_eq() {
        assert!(strict_eq(&json!(3), &json!(3.0)));
        assert!(strict_eq(&json!("a"), &json!("a")));
        assert!(!strict_eq(&json!("3"), &json!(3)));
        assert!(!strict_eq(&json!(null), &json!(0)));
    }

    #[test]
    fn test_loose_eq() {
        assert!(loose_eq(&json!("3"), &json!(3)));
        assert!(loose_eq(&json!(true), &json!(1)));
        assert!(!loose_eq(&json!("a"), &json!("b")));
        assert!(!loose_eq(&json!(null), &json!(0)));
    }

    #[test]
    fn test_compare_numbers_and_strings() {
        assert_eq!(compare(&json!(2), &json!(10)), Some(Ordering::Less));
        assert_eq!(compare(&json!("2"), &json!(2)), Some(Ordering::Equal));
        assert_eq!(compare(&json!("b"), &json!("a")), Some(Ordering::Greater));
        assert_eq!(compare(&json!([1]), &json!(1)), None);
    }

    // ── Paths ───────────────────────────────────────────────────────

    #[test]
    fn test_get_path() {
        let data = json!({"a": {"b": {"c": "ddd"}}, "list": [10, 20]});
        assert_eq!(get_path(&data, "a.b.c"), Some(&json!("ddd")));
        assert_eq!(get_path(&data, "list.1"), Some(&json!(20)));
        assert_eq!(get_path(&data, "a.x"), None);
    }

    #[test]
    fn test_type_of() {
        assert_eq!(type_of(None), "undefined");
        assert_eq!(type_of(Some(&json!(1))), "number");
        assert_eq!(type_of(Some(&json!("x"))), "string");
        assert_eq!(type_of(Some(&json!(null))), "object");
        assert_eq!(type_of(Some(&json!([1]))), "object");
    }
}
