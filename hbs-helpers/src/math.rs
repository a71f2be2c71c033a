//! Arithmetic helpers.
//!
//! Numeric arguments may be numbers or numeric strings. Helpers that cannot
//! produce anything sensible from bad input fail the render with a type
//! error; integral results render without a decimal point.

use handlebars::{Context, Handlebars, Helper};
use rand::Rng;
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::value::{as_f64, num_to_json, render_string};
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

fn num_arg(h: &Helper<'_, '_>, helper: &'static str, index: usize) -> Result<f64, HelperError> {
    let raw = param(h, index).ok_or(HelperError::MissingArgument {
        helper,
        argument: "number",
    })?;
    as_f64(raw).ok_or_else(|| HelperError::Type {
        helper,
        expected: "a number",
        received: render_string(raw),
    })
}

/// Collects every numeric value in the arguments, flattening one level of
/// arrays and ignoring everything non-numeric.
fn collect_numbers(h: &Helper<'_, '_>) -> Vec<f64> {
    let mut numbers = Vec::new();
    for p in h.params() {
        match p.value() {
            Json::Array(items) => numbers.extend(items.iter().filter_map(as_f64)),
            other => {
                if let Some(n) = as_f64(other) {
                    numbers.push(n);
                }
            }
        }
    }
    numbers
}

/// `{{abs num}}`
pub struct Abs;

impl ValueHelper for Abs {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(num_arg(h, "abs", 0)?.abs()))
    }
}

/// `{{add a b}}` - numeric addition; concatenates when both arguments are
/// strings, renders nothing otherwise.
pub struct Add;

impl ValueHelper for Add {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (param(h, 0), param(h, 1)) {
            (Some(a), Some(b)) => match (as_f64(a), as_f64(b)) {
                (Some(x), Some(y)) => Ok(num_to_json(x + y)),
                _ => match (a, b) {
                    (Json::String(x), Json::String(y)) => Ok(json!(format!("{x}{y}"))),
                    _ => Ok(json!("")),
                },
            },
            _ => Ok(json!("")),
        }
    }
}

/// `{{plus a b}}` - strict numeric addition.
pub struct Plus;

impl ValueHelper for Plus {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(num_arg(h, "plus", 0)? + num_arg(h, "plus", 1)?))
    }
}

/// `{{subtract a b}}` / `{{minus a b}}`
pub struct Subtract;

impl ValueHelper for Subtract {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(
            num_arg(h, "subtract", 0)? - num_arg(h, "subtract", 1)?,
        ))
    }
}

/// `{{multiply a b}}` / `{{times a b}}`
pub struct Multiply;

impl ValueHelper for Multiply {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(
            num_arg(h, "multiply", 0)? * num_arg(h, "multiply", 1)?,
        ))
    }
}

/// `{{divide a b}}` - division by zero renders as empty.
pub struct Divide;

impl ValueHelper for Divide {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(
            num_arg(h, "divide", 0)? / num_arg(h, "divide", 1)?,
        ))
    }
}

/// `{{modulo a b}}` / `{{remainder a b}}`
pub struct Modulo;

impl ValueHelper for Modulo {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(
            num_arg(h, "modulo", 0)? % num_arg(h, "modulo", 1)?,
        ))
    }
}

/// `{{ceil num}}`
pub struct Ceil;

impl ValueHelper for Ceil {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(num_arg(h, "ceil", 0)?.ceil()))
    }
}

/// `{{floor num}}`
pub struct Floor;

impl ValueHelper for Floor {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(num_arg(h, "floor", 0)?.floor()))
    }
}

/// `{{round num}}`
pub struct Round;

impl ValueHelper for Round {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(num_arg(h, "round", 0)?.round()))
    }
}

/// `{{sum a b c}}` - sums every numeric argument, flattening arrays and
/// skipping anything non-numeric.
pub struct Sum;

impl ValueHelper for Sum {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(num_to_json(collect_numbers(h).iter().sum()))
    }
}

/// `{{avg a b c}}` - the mean of every numeric argument; `0` when there are
/// none.
pub struct Avg;

impl ValueHelper for Avg {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let numbers = collect_numbers(h);
        if numbers.is_empty() {
            return Ok(json!(0));
        }
        #[allow(clippy::cast_precision_loss)]
        Ok(num_to_json(numbers.iter().sum::<f64>() / numbers.len() as f64))
    }
}

/// `{{random min max}}` - a random integer in `[min, max]`.
pub struct Random;

impl ValueHelper for Random {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        #[allow(clippy::cast_possible_truncation)]
        let min = num_arg(h, "random", 0)? as i64;
        #[allow(clippy::cast_possible_truncation)]
        let max = num_arg(h, "random", 1)? as i64;
        if min > max {
            return Err(HelperError::Type {
                helper: "random",
                expected: "min <= max",
                received: format!("{min} > {max}"),
            });
        }
        Ok(json!(rand::thread_rng().gen_range(min..=max)))
    }
}

/// Registers the math helpers. `minus`, `times`, and `remainder` are aliases
/// for `subtract`, `multiply`, and `modulo`.
pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("abs", Box::new(Inline(Abs)));
    hb.register_helper("add", Box::new(Inline(Add)));
    hb.register_helper("avg", Box::new(Inline(Avg)));
    hb.register_helper("ceil", Box::new(Inline(Ceil)));
    hb.register_helper("divide", Box::new(Inline(Divide)));
    hb.register_helper("floor", Box::new(Inline(Floor)));
    hb.register_helper("minus", Box::new(Inline(Subtract)));
    hb.register_helper("modulo", Box::new(Inline(Modulo)));
    hb.register_helper("multiply", Box::new(Inline(Multiply)));
    hb.register_helper("plus", Box::new(Inline(Plus)));
    hb.register_helper("random", Box::new(Inline(Random)));
    hb.register_helper("remainder", Box::new(Inline(Modulo)));
    hb.register_helper("round", Box::new(Inline(Round)));
    hb.register_helper("subtract", Box::new(Inline(Subtract)));
    hb.register_helper("sum", Box::new(Inline(Sum)));
    hb.register_helper("times", Box::new(Inline(Multiply)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(tpl: &str, data: &Json) -> String {
        let mut hb = Handlebars::new();
        register(&mut hb);
        hb.render_template(tpl, data).unwrap()
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(render("{{plus 1 2}}", &json!({})), "3");
        assert_eq!(render("{{subtract 10 4}}", &json!({})), "6");
        assert_eq!(render("{{minus 10 4}}", &json!({})), "6");
        assert_eq!(render("{{multiply 3 4}}", &json!({})), "12");
        assert_eq!(render("{{times 3 4}}", &json!({})), "12");
        assert_eq!(render("{{divide 10 4}}", &json!({})), "2.5");
        assert_eq!(render("{{modulo 10 3}}", &json!({})), "1");
        assert_eq!(render("{{remainder 10 3}}", &json!({})), "1");
    }

    #[test]
    fn test_numeric_strings_coerce() {
        assert_eq!(render("{{plus a b}}", &json!({"a": "1.5", "b": "2"})), "3.5");
    }

    #[test]
    fn test_add_falls_back_to_concat() {
        assert_eq!(render("{{add 1 2}}", &json!({})), "3");
        assert_eq!(render("{{add \"foo\" \"bar\"}}", &json!({})), "foobar");
        assert_eq!(render("{{add a b}}", &json!({"a": [1], "b": 2})), "");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(render("{{ceil 1.2}}", &json!({})), "2");
        assert_eq!(render("{{floor 1.8}}", &json!({})), "1");
        assert_eq!(render("{{round 2.5}}", &json!({})), "3");
        assert_eq!(render("{{abs -4}}", &json!({})), "4");
    }

    #[test]
    fn test_sum_and_avg() {
        assert_eq!(render("{{sum 1 2 3}}", &json!({})), "6");
        assert_eq!(render("{{sum list 4}}", &json!({"list": [1, 2, 3]})), "10");
        assert_eq!(render("{{sum 1 \"x\" 2}}", &json!({})), "3");
        assert_eq!(render("{{avg 1 2 3 4}}", &json!({})), "2.5");
        assert_eq!(render("{{avg}}", &json!({})), "0");
    }

    #[test]
    fn test_random_in_range() {
        let out: i64 = render("{{random 0 9}}", &json!({})).parse().unwrap();
        assert!((0..=9).contains(&out));
    }

    #[test]
    fn test_type_errors_fail_the_render() {
        let mut hb = Handlebars::new();
        register(&mut hb);
        let err = hb.render_template("{{abs \"x\"}}", &json!({})).unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }
}
