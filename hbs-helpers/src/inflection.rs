//! Pluralization and ordinal suffixes.

use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::value::{as_f64, num_to_json, render_string, truthy};
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// `{{inflect count singular plural includeCount}}` - picks the singular
/// form only when the count is exactly one; a truthy fourth argument
/// prefixes the count.
pub struct Inflect;

impl ValueHelper for Inflect {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let count = param(h, 0).and_then(as_f64).unwrap_or(0.0);
        let singular = param(h, 1).and_then(Json::as_str).unwrap_or("");
        let plural = param(h, 2).and_then(Json::as_str).unwrap_or(singular);
        let word = if count > 1.0 || count == 0.0 { plural } else { singular };
        if param(h, 3).is_some_and(truthy) {
            Ok(json!(format!("{} {word}", render_string(&num_to_json(count)))))
        } else {
            Ok(json!(word))
        }
    }
}

/// `{{ordinalize num}}` - `1st`, `22nd`, `13th`.
pub struct Ordinalize;

impl ValueHelper for Ordinalize {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let number = param(h, 0).and_then(as_f64).unwrap_or(0.0);
        #[allow(clippy::cast_possible_truncation)]
        let truncated = number.abs().trunc() as i64;
        let rendered = render_string(&num_to_json(number));
        let suffix = match truncated % 100 {
            11..=13 => "th",
            _ => match truncated % 10 {
                1 => "st",
                2 => "nd",
                3 => "rd",
                _ => "th",
            },
        };
        Ok(json!(format!("{rendered}{suffix}")))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("inflect", Box::new(Inline(Inflect)));
    hb.register_helper("ordinalize", Box::new(Inline(Ordinalize)));
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
    fn test_inflect() {
        let tpl = "{{inflect n \"apple\" \"apples\"}}";
        assert_eq!(render(tpl, &json!({"n": 0})), "apples");
        assert_eq!(render(tpl, &json!({"n": 1})), "apple");
        assert_eq!(render(tpl, &json!({"n": 2})), "apples");
    }

    #[test]
    fn test_inflect_with_count() {
        let tpl = "{{inflect n \"apple\" \"apples\" true}}";
        assert_eq!(render(tpl, &json!({"n": 1})), "1 apple");
        assert_eq!(render(tpl, &json!({"n": 3})), "3 apples");
    }

    #[test]
    fn test_ordinalize() {
        assert_eq!(render("{{ordinalize 1}}", &json!({})), "1st");
        assert_eq!(render("{{ordinalize 22}}", &json!({})), "22nd");
        assert_eq!(render("{{ordinalize 13}}", &json!({})), "13th");
        assert_eq!(render("{{ordinalize 111}}", &json!({})), "111th");
        assert_eq!(render("{{ordinalize 103}}", &json!({})), "103rd");
    }
}
