//! Number formatting helpers.

use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::value::{as_f64, len_of, num_to_json, render_string};
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

fn digits_arg(h: &Helper<'_, '_>, index: usize) -> Option<usize> {
    param(h, index)
        .and_then(as_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
}

/// Formats in scientific notation with an explicitly signed exponent,
/// `1.2345e+4` style.
fn format_exponential(x: f64, digits: Option<usize>) -> String {
    let s = match digits {
        Some(d) => format!("{x:.d$e}"),
        None => format!("{x:e}"),
    };
    match s.find('e') {
        Some(i) if !s[i + 1..].starts_with('-') => format!("{}e+{}", &s[..i], &s[i + 1..]),
        _ => s,
    }
}

/// Formats with `p` significant digits, switching to exponential notation for
/// very large or very small magnitudes.
fn format_precision(x: f64, p: usize) -> String {
    if p == 0 {
        return render_string(&num_to_json(x));
    }
    if x == 0.0 {
        return format!("{:.*}", p - 1, 0.0);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let exponent = x.abs().log10().floor() as i64;
    #[allow(clippy::cast_possible_wrap)]
    if exponent < -6 || exponent >= p as i64 {
        format_exponential(x, Some(p - 1))
    } else {
        #[allow(clippy::cast_sign_loss)]
        let decimals = (p as i64 - 1 - exponent).max(0) as usize;
        format!("{x:.decimals$}")
    }
}

fn group_thousands(n: f64) -> String {
    let rendered = render_string(&num_to_json(n));
    let (sign, rest) = rendered
        .strip_prefix('-')
        .map_or(("", rendered.as_str()), |r| ("-", r));
    let (int_part, frac) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `{{addCommas num}}` - `1234567` becomes `1,234,567`.
pub struct AddCommas;

impl ValueHelper for AddCommas {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(json!(group_thousands(num_arg(h, "addCommas", 0)?)))
    }
}

/// `{{bytes value precision}}` - formats a byte count with decimal units
/// (`B`, `kB`, `MB`, `GB`, `TB`). A non-numeric string formats its length.
pub struct Bytes;

impl ValueHelper for Bytes {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];
        let number = match param(h, 0) {
            None | Some(Json::Null) => return Ok(json!("0 B")),
            Some(v) => match as_f64(v).or_else(|| {
                #[allow(clippy::cast_precision_loss)]
                len_of(v).map(|n| n as f64)
            }) {
                Some(n) if n != 0.0 => n,
                _ => return Ok(json!("0 B")),
            },
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let precision = 10f64.powi(digits_arg(h, 1).unwrap_or(2) as i32);
        for len in (0..UNITS.len()).rev() {
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let size = 10f64.powi((len * 3) as i32);
            if size <= number + 1.0 {
                let scaled = (number * precision / size).round() / precision;
                return Ok(json!(format!(
                    "{} {}",
                    render_string(&num_to_json(scaled)),
                    UNITS[len]
                )));
            }
        }
        Ok(json!(render_string(&num_to_json(number))))
    }
}

/// `{{phoneNumber num}}` - `5555555555` becomes `(555) 555-5555`.
pub struct PhoneNumber;

impl ValueHelper for PhoneNumber {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(raw) = param(h, 0) else {
            return Ok(Json::Null);
        };
        let digits = render_string(raw);
        let area = digits.get(0..3).unwrap_or("");
        let prefix = digits.get(3..6).unwrap_or("");
        let line = digits.get(6..10).unwrap_or("");
        Ok(json!(format!("({area}) {prefix}-{line}")))
    }
}

/// `{{toAbbr num precision}}` - `16233` becomes `16.23k`; units go up to
/// `q` for quadrillions.
pub struct ToAbbr;

impl ValueHelper for ToAbbr {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        const UNITS: [&str; 5] = ["k", "m", "b", "t", "q"];
        let number = param(h, 0).and_then(as_f64).unwrap_or(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let precision = 10f64.powi(digits_arg(h, 1).unwrap_or(2) as i32);
        for len in (0..UNITS.len()).rev() {
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let size = 10f64.powi(((len + 1) * 3) as i32);
            if size <= number + 1.0 {
                let scaled = (number * precision / size).round() / precision;
                return Ok(json!(format!(
                    "{}{}",
                    render_string(&num_to_json(scaled)),
                    UNITS[len]
                )));
            }
        }
        Ok(num_to_json(number))
    }
}

/// `{{toExponential num digits}}`
pub struct ToExponential;

impl ValueHelper for ToExponential {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let number = num_arg(h, "toExponential", 0)?;
        Ok(json!(format_exponential(number, digits_arg(h, 1))))
    }
}

/// `{{toFixed num digits}}` - fixed-point notation, zero decimals by default.
pub struct ToFixed;

impl ValueHelper for ToFixed {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let number = num_arg(h, "toFixed", 0)?;
        let digits = digits_arg(h, 1).unwrap_or(0);
        Ok(json!(format!("{number:.digits$}")))
    }
}

/// `{{toFloat num}}`
pub struct ToFloat;

impl ValueHelper for ToFloat {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(param(h, 0).and_then(as_f64).map_or(Json::Null, |n| {
            serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
        }))
    }
}

/// `{{toInt num}}` - truncates toward zero.
pub struct ToInt;

impl ValueHelper for ToInt {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        #[allow(clippy::cast_possible_truncation)]
        Ok(param(h, 0)
            .and_then(as_f64)
            .map_or(Json::Null, |n| json!(n.trunc() as i64)))
    }
}

/// `{{toPrecision num precision}}` - formats with the given number of
/// significant digits.
pub struct ToPrecision;

impl ValueHelper for ToPrecision {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let number = num_arg(h, "toPrecision", 0)?;
        match digits_arg(h, 1) {
            Some(p) => Ok(json!(format_precision(number, p))),
            None => Ok(num_to_json(number)),
        }
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("addCommas", Box::new(Inline(AddCommas)));
    hb.register_helper("bytes", Box::new(Inline(Bytes)));
    hb.register_helper("phoneNumber", Box::new(Inline(PhoneNumber)));
    hb.register_helper("toAbbr", Box::new(Inline(ToAbbr)));
    hb.register_helper("toExponential", Box::new(Inline(ToExponential)));
    hb.register_helper("toFixed", Box::new(Inline(ToFixed)));
    hb.register_helper("toFloat", Box::new(Inline(ToFloat)));
    hb.register_helper("toInt", Box::new(Inline(ToInt)));
    hb.register_helper("toPrecision", Box::new(Inline(ToPrecision)));
}
