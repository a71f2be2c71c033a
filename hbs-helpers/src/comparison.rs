//! Comparison and boolean-logic helpers.
//!
//! All of these can be used three ways: as block helpers with an optional
//! `{{else}}` section, inline (rendering `true`/`false`), or as
//! subexpressions inside `if`/`unless`. Two-operand helpers accept the second
//! operand either positionally or as a `compare=` hash argument.

use std::cmp::Ordering;

use handlebars::{Context, Handlebars, Helper};
use serde_json::Value as Json;

use hbs_helpers_core::convention::{param, second_operand};
use hbs_helpers_core::value::{self, render_string};
use hbs_helpers_core::{Conditional, HelperError, Inline, TestHelper, ValueHelper};

fn ordered(h: &Helper<'_, '_>, wanted: &[Ordering]) -> bool {
    match (param(h, 0), second_operand(h)) {
        (Some(a), Some(b)) => value::compare(a, b).is_some_and(|ord| wanted.contains(&ord)),
        _ => false,
    }
}

fn both<'a>(h: &'a Helper<'_, '_>) -> Option<(&'a Json, &'a Json)> {
    Some((param(h, 0)?, second_operand(h)?))
}

/// `{{#and a b c}}...{{else}}...{{/and}}` - every argument is truthy.
/// With no arguments at all, `and` is false.
pub struct And;

impl TestHelper for And {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!h.params().is_empty() && h.params().iter().all(|p| value::truthy(p.value())))
    }
}

/// `{{#or a b c}}...{{else}}...{{/or}}` - at least one argument is truthy.
pub struct Or;

impl TestHelper for Or {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(h.params().iter().any(|p| value::truthy(p.value())))
    }
}

/// `{{#not value}}...{{/not}}`
pub struct Not;

impl TestHelper for Not {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!param(h, 0).is_some_and(value::truthy))
    }
}

/// `{{#neither a b}}...{{/neither}}` - both arguments are falsey.
pub struct Neither;

impl TestHelper for Neither {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let a = param(h, 0).is_some_and(value::truthy);
        let b = param(h, 1).is_some_and(value::truthy);
        Ok(!a && !b)
    }
}

/// `{{#compare a operator b}}...{{else}}...{{/compare}}` - general-purpose
/// comparison with an explicit operator: `==`, `===`, `!=`, `!==`, `<`, `>`,
/// `<=`, `>=`, or `typeof`.
pub struct Compare;

impl TestHelper for Compare {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let (Some(a), Some(op), Some(b)) = (param(h, 0), param(h, 1), param(h, 2)) else {
            return Err(HelperError::MissingArgument {
                helper: "compare",
                argument: "a, operator, b",
            });
        };
        let operator = render_string(op);
        let outcome = match operator.as_str() {
            "==" => value::loose_eq(a, b),
            "===" => value::strict_eq(a, b),
            "!=" => !value::loose_eq(a, b),
            "!==" => !value::strict_eq(a, b),
            "<" => value::compare(a, b) == Some(Ordering::Less),
            ">" => value::compare(a, b) == Some(Ordering::Greater),
            "<=" => matches!(value::compare(a, b), Some(Ordering::Less | Ordering::Equal)),
            ">=" => matches!(value::compare(a, b), Some(Ordering::Greater | Ordering::Equal)),
            "typeof" => value::type_of(Some(a)) == render_string(b),
            _ => {
                return Err(HelperError::InvalidOperator {
                    helper: "compare",
                    operator,
                })
            }
        };
        Ok(outcome)
    }
}

/// `{{#contains collection value}}...{{else}}...{{/contains}}` - substring of
/// a string, element of an array (optionally from a start index), or key of
/// an object.
pub struct Contains;

impl TestHelper for Contains {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let (Some(collection), Some(needle)) = (param(h, 0), param(h, 1)) else {
            return Ok(false);
        };
        let start = param(h, 2)
            .and_then(value::as_f64)
            .filter(|n| *n >= 0.0)
            .map_or(0, |n| n as usize);
        match collection {
            Json::String(s) => Ok(s.contains(&render_string(needle))),
            Json::Array(items) => Ok(items
                .iter()
                .skip(start)
                .any(|item| value::strict_eq(item, needle))),
            Json::Object(map) => Ok(map.contains_key(&render_string(needle))),
            _ => Ok(false),
        }
    }
}

/// `{{default value fallback}}` - the value unless it is missing or `null`.
pub struct Default;

impl ValueHelper for Default {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match param(h, 0) {
            Some(Json::Null) | None => Ok(param(h, 1).cloned().unwrap_or(Json::String(String::new()))),
            Some(v) => Ok(v.clone()),
        }
    }
}

/// `{{#eq a b}}` - strict equality; numbers compare by value.
pub struct Eq;

impl TestHelper for Eq {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(both(h).is_some_and(|(a, b)| value::strict_eq(a, b)))
    }
}

/// `{{#is a b}}` - loose equality, so `"1"` is `1`.
pub struct Is;

impl TestHelper for Is {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(both(h).is_some_and(|(a, b)| value::loose_eq(a, b)))
    }
}

/// `{{#isnt a b}}` - loose inequality.
pub struct Isnt;

impl TestHelper for Isnt {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!both(h).is_some_and(|(a, b)| value::loose_eq(a, b)))
    }
}

/// `{{#gt a b}}`
pub struct Gt;

impl TestHelper for Gt {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(ordered(h, &[Ordering::Greater]))
    }
}

/// `{{#gte a b}}`
pub struct Gte;

impl TestHelper for Gte {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(ordered(h, &[Ordering::Greater, Ordering::Equal]))
    }
}

/// `{{#lt a b}}`
pub struct Lt;

impl TestHelper for Lt {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(ordered(h, &[Ordering::Less]))
    }
}

/// `{{#lte a b}}`
pub struct Lte;

impl TestHelper for Lte {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(ordered(h, &[Ordering::Less, Ordering::Equal]))
    }
}

/// `{{#has value pattern}}` - like [`Contains`] with the operands in the
/// same order, but tolerant of a missing pattern.
pub struct Has;

impl TestHelper for Has {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let (Some(collection), Some(needle)) = (param(h, 0), param(h, 1)) else {
            return Ok(false);
        };
        match collection {
            Json::String(s) => Ok(s.contains(&render_string(needle))),
            Json::Array(items) => Ok(items.iter().any(|item| value::strict_eq(item, needle))),
            Json::Object(map) => Ok(map.contains_key(&render_string(needle))),
            _ => Ok(false),
        }
    }
}

/// `{{#isFalsey value}}` - falsey values plus "no"-like words (`"no"`,
/// `"none"`, `"nope"`, `"nil"`, ...).
pub struct IsFalsey;

impl TestHelper for IsFalsey {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(param(h, 0).map_or(true, value::falsey))
    }
}

/// `{{#isTruthy value}}` - the negation of [`IsFalsey`].
pub struct IsTruthy;

impl TestHelper for IsTruthy {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(param(h, 0).is_some_and(|v| !value::falsey(v)))
    }
}

/// `{{#ifEven num}}`
pub struct IfEven;

impl TestHelper for IfEven {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(param(h, 0)
            .and_then(value::as_f64)
            .is_some_and(|n| n % 2.0 == 0.0))
    }
}

/// `{{#ifOdd num}}`
pub struct IfOdd;

impl TestHelper for IfOdd {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(param(h, 0)
            .and_then(value::as_f64)
            .is_some_and(|n| (n % 2.0).abs() == 1.0))
    }
}

/// `{{#ifNth a b}}` - `b` is a multiple of `a`.
pub struct IfNth;

impl TestHelper for IfNth {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        match (
            param(h, 0).and_then(value::as_f64),
            param(h, 1).and_then(value::as_f64),
        ) {
            (Some(a), Some(b)) if a != 0.0 => Ok(b % a == 0.0),
            _ => Ok(false),
        }
    }
}

/// `{{#unlessEq a b}}` - renders the block when the operands are not
/// strictly equal.
pub struct UnlessEq;

impl TestHelper for UnlessEq {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!both(h).is_some_and(|(a, b)| value::strict_eq(a, b)))
    }
}

/// `{{#unlessGt a b}}` - renders the block when `a` is not greater than `b`.
pub struct UnlessGt;

impl TestHelper for UnlessGt {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!ordered(h, &[Ordering::Greater]))
    }
}

/// `{{#unlessLt a b}}` - renders the block when `a` is not less than `b`.
pub struct UnlessLt;

impl TestHelper for UnlessLt {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!ordered(h, &[Ordering::Less]))
    }
}

/// `{{#unlessGteq a b}}` - renders the block when `a` is less than `b`.
pub struct UnlessGteq;

impl TestHelper for UnlessGteq {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!ordered(h, &[Ordering::Greater, Ordering::Equal]))
    }
}

/// `{{#unlessLteq a b}}` - renders the block when `a` is greater than `b`.
pub struct UnlessLteq;

impl TestHelper for UnlessLteq {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(!ordered(h, &[Ordering::Less, Ordering::Equal]))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("and", Box::new(Conditional(And)));
    hb.register_helper("compare", Box::new(Conditional(Compare)));
    hb.register_helper("contains", Box::new(Conditional(Contains)));
    hb.register_helper("default", Box::new(Inline(Default)));
    hb.register_helper("eq", Box::new(Conditional(Eq)));
    hb.register_helper("gt", Box::new(Conditional(Gt)));
    hb.register_helper("gte", Box::new(Conditional(Gte)));
    hb.register_helper("has", Box::new(Conditional(Has)));
    hb.register_helper("ifEven", Box::new(Conditional(IfEven)));
    hb.register_helper("ifNth", Box::new(Conditional(IfNth)));
    hb.register_helper("ifOdd", Box::new(Conditional(IfOdd)));
    hb.register_helper("is", Box::new(Conditional(Is)));
    hb.register_helper("isFalsey", Box::new(Conditional(IsFalsey)));
    hb.register_helper("isTruthy", Box::new(Conditional(IsTruthy)));
    hb.register_helper("isnt", Box::new(Conditional(Isnt)));
    hb.register_helper("lt", Box::new(Conditional(Lt)));
    hb.register_helper("lte", Box::new(Conditional(Lte)));
    hb.register_helper("neither", Box::new(Conditional(Neither)));
    hb.register_helper("not", Box::new(Conditional(Not)));
    hb.register_helper("or", Box::new(Conditional(Or)));
    hb.register_helper("unlessEq", Box::new(Conditional(UnlessEq)));
    hb.register_helper("unlessGt", Box::new(Conditional(UnlessGt)));
    hb.register_helper("unlessGteq", Box::new(Conditional(UnlessGteq)));
    hb.register_helper("unlessLt", Box::new(Conditional(UnlessLt)));
    hb.register_helper("unlessLteq", Box::new(Conditional(UnlessLteq)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn render(tpl: &str, data: &Json) -> String {
        let mut hb = Handlebars::new();
        register(&mut hb);
        hb.render_template(tpl, data).unwrap()
    }

    // ── Equality ────────────────────────────────────────────────────

    #[test]
    fn test_eq_is_strict() {
        assert_eq!(render("{{eq a b}}", &json!({"a": 1, "b": 1})), "true");
        assert_eq!(render("{{eq a b}}", &json!({"a": "1", "b": 1})), "false");
        assert_eq!(render("{{#eq a compare=3}}y{{else}}n{{/eq}}", &json!({"a": 3})), "y");
    }

    #[test]
    fn test_is_and_isnt_are_loose() {
        assert_eq!(render("{{is a b}}", &json!({"a": "1", "b": 1})), "true");
        assert_eq!(render("{{isnt a b}}", &json!({"a": "1", "b": 1})), "false");
        assert_eq!(render("{{isnt a b}}", &json!({"a": 1, "b": 2})), "true");
    }

    // ── Ordering ────────────────────────────────────────────────────

    #[test]
    fn test_relational() {
        assert_eq!(render("{{gt 5 3}}", &json!({})), "true");
        assert_eq!(render("{{gte 3 3}}", &json!({})), "true");
        assert_eq!(render("{{lt \"2\" 10}}", &json!({})), "true");
        assert_eq!(render("{{lte 4 3}}", &json!({})), "false");
    }

    #[test]
    fn test_unless_family() {
        assert_eq!(render("{{#unlessEq a 5}}not five{{/unlessEq}}", &json!({"a": 4})), "not five");
        assert_eq!(render("{{#unlessGt a 5}}small{{/unlessGt}}", &json!({"a": 5})), "small");
        assert_eq!(render("{{#unlessLt a 5}}big{{/unlessLt}}", &json!({"a": 5})), "big");
        assert_eq!(render("{{#unlessGteq a 5}}below{{/unlessGteq}}", &json!({"a": 4})), "below");
        assert_eq!(render("{{#unlessLteq a 5}}above{{/unlessLteq}}", &json!({"a": 6})), "above");
    }

    // ── compare ─────────────────────────────────────────────────────

    #[test]
    fn test_compare_operators() {
        assert_eq!(render("{{#compare 1 \"==\" \"1\"}}y{{else}}n{{/compare}}", &json!({})), "y");
        assert_eq!(render("{{#compare 1 \"===\" \"1\"}}y{{else}}n{{/compare}}", &json!({})), "n");
        assert_eq!(render("{{#compare 2 \"<\" 10}}y{{else}}n{{/compare}}", &json!({})), "y");
        assert_eq!(render("{{#compare a \"typeof\" \"number\"}}y{{else}}n{{/compare}}", &json!({"a": 2})), "y");
    }

    #[test]
    fn test_compare_rejects_unknown_operator() {
        let mut hb = Handlebars::new();
        register(&mut hb);
        let err = hb
            .render_template("{{#compare 1 \"~>\" 2}}y{{/compare}}", &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("invalid operator"));
    }

    // ── Logic ───────────────────────────────────────────────────────

    #[test]
    fn test_and_or_not_neither() {
        assert_eq!(render("{{and a b}}", &json!({"a": 1, "b": "x"})), "true");
        assert_eq!(render("{{and a b}}", &json!({"a": 1, "b": 0})), "false");
        assert_eq!(render("{{or a b}}", &json!({"a": 0, "b": "x"})), "true");
        assert_eq!(render("{{or a b}}", &json!({"a": 0})), "false");
        assert_eq!(render("{{not a}}", &json!({"a": 0})), "true");
        assert_eq!(render("{{neither a b}}", &json!({"a": 0, "b": false})), "true");
    }

    #[test]
    fn test_and_without_arguments_is_false() {
        assert_eq!(render("{{and}}", &json!({})), "false");
        assert_eq!(render("{{#and}}y{{else}}n{{/and}}", &json!({})), "n");
    }

    // ── Membership ──────────────────────────────────────────────────

    #[test]
    fn test_contains() {
        assert_eq!(render("{{contains \"abcd\" \"bc\"}}", &json!({})), "true");
        assert_eq!(render("{{contains list 2}}", &json!({"list": [1, 2]})), "true");
        assert_eq!(render("{{contains list 2 2}}", &json!({"list": [1, 2, 3]})), "false");
        assert_eq!(render("{{contains obj \"k\"}}", &json!({"obj": {"k": 1}})), "true");
    }

    #[test]
    fn test_has() {
        assert_eq!(render("{{has \"foobar\" \"oo\"}}", &json!({})), "true");
        assert_eq!(render("{{has list \"c\"}}", &json!({"list": ["a", "b"]})), "false");
    }

    // ── Truthiness ──────────────────────────────────────────────────

    #[test]
    fn test_falsey_truthy() {
        assert_eq!(render("{{isFalsey \"nope\"}}", &json!({})), "true");
        assert_eq!(render("{{isTruthy \"yes\"}}", &json!({})), "true");
        assert_eq!(render("{{isTruthy 0}}", &json!({})), "false");
    }

    // ── Parity ──────────────────────────────────────────────────────

    #[test]
    fn test_parity() {
        assert_eq!(render("{{ifEven 4}}", &json!({})), "true");
        assert_eq!(render("{{ifOdd 5}}", &json!({})), "true");
        assert_eq!(render("{{#ifNth 3 9}}nth{{/ifNth}}", &json!({})), "nth");
        assert_eq!(render("{{#ifNth 3 10}}nth{{else}}off{{/ifNth}}", &json!({})), "off");
    }

    // ── default ─────────────────────────────────────────────────────

    #[test]
    fn test_default() {
        assert_eq!(render("{{default title \"untitled\"}}", &json!({})), "untitled");
        assert_eq!(render("{{default title \"untitled\"}}", &json!({"title": "post"})), "post");
        assert_eq!(render("{{default count 0}}", &json!({"count": null})), "0");
    }
}
