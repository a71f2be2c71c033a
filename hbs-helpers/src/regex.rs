//! Regular expression helpers.

use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::{Conditional, HelperError, Inline, TestHelper, ValueHelper};

fn compile(pattern: &str, helper: &'static str) -> Result<::regex::Regex, HelperError> {
    ::regex::Regex::new(pattern).map_err(|e| HelperError::Parse {
        helper,
        message: format!("bad pattern `{pattern}`: {e}"),
    })
}

/// `{{toRegex pattern}}` - validates a pattern so it can be handed to `test`
/// as a subexpression: `{{test name (toRegex "^ab")}}`.
pub struct ToRegex;

impl ValueHelper for ToRegex {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(pattern) = param(h, 0).and_then(Json::as_str) else {
            return Ok(Json::Null);
        };
        compile(pattern, "toRegex")?;
        Ok(json!(pattern))
    }
}

/// `{{#test str pattern}}...{{/test}}`
pub struct Test;

impl TestHelper for Test {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let (Some(subject), Some(pattern)) = (
            param(h, 0).and_then(Json::as_str),
            param(h, 1).and_then(Json::as_str),
        ) else {
            return Ok(false);
        };
        Ok(compile(pattern, "test")?.is_match(subject))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("test", Box::new(Conditional(Test)));
    hb.register_helper("toRegex", Box::new(Inline(ToRegex)));
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
    fn test_test() {
        assert_eq!(render("{{test \"foobar\" \"foo\"}}", &json!({})), "true");
        assert_eq!(render("{{test \"foobar\" \"^bar\"}}", &json!({})), "false");
    }

    #[test]
    fn test_to_regex_subexpression() {
        assert_eq!(
            render("{{#test name (toRegex \"^post-\")}}y{{else}}n{{/test}}", &json!({"name": "post-1"})),
            "y"
        );
    }

    #[test]
    fn test_invalid_pattern_fails_render() {
        let mut hb = Handlebars::new();
        register(&mut hb);
        let err = hb
            .render_template("{{toRegex \"(\"}}", &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("bad pattern"));
    }
}
