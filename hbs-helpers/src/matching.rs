//! Glob-matching helpers.

use glob::Pattern;
use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::{Conditional, HelperError, Inline, TestHelper, ValueHelper};

fn patterns(value: &Json, helper: &'static str) -> Result<Vec<Pattern>, HelperError> {
    let raw: Vec<&str> = match value {
        Json::String(s) => vec![s.as_str()],
        Json::Array(items) => items.iter().filter_map(Json::as_str).collect(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| HelperError::Parse {
                helper,
                message: format!("bad glob `{p}`: {e}"),
            })
        })
        .collect()
}

/// `{{match list patterns}}` - the items matching any of the given glob
/// patterns. `list` and `patterns` may each be a string or an array.
pub struct Match;

impl ValueHelper for Match {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let candidates: Vec<String> = match param(h, 0) {
            Some(Json::String(s)) => vec![s.clone()],
            Some(Json::Array(items)) => items
                .iter()
                .filter_map(Json::as_str)
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };
        let globs = param(h, 1).map_or_else(|| Ok(Vec::new()), |p| patterns(p, "match"))?;
        let matched: Vec<String> = candidates
            .into_iter()
            .filter(|c| globs.iter().any(|g| g.matches(c)))
            .collect();
        Ok(json!(matched))
    }
}

/// `{{#isMatch value pattern}}...{{/isMatch}}`
pub struct IsMatch;

impl TestHelper for IsMatch {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let (Some(Json::String(candidate)), Some(pattern)) = (param(h, 0), param(h, 1)) else {
            return Ok(false);
        };
        let globs = patterns(pattern, "isMatch")?;
        Ok(globs.iter().any(|g| g.matches(candidate)))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("isMatch", Box::new(Conditional(IsMatch)));
    hb.register_helper("match", Box::new(Inline(Match)));
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
    fn test_match() {
        let data = json!({"files": ["a.js", "b.md", "c.js"]});
        assert_eq!(render("{{match files \"*.js\"}}", &data), "a.js,c.js");
        assert_eq!(
            render("{{match files patterns}}", &json!({"files": ["a.js", "b.md"], "patterns": ["*.md"]})),
            "b.md"
        );
    }

    #[test]
    fn test_is_match() {
        assert_eq!(render("{{isMatch \"foo.md\" \"*.md\"}}", &json!({})), "true");
        assert_eq!(render("{{isMatch \"foo.md\" \"*.js\"}}", &json!({})), "false");
        let tpl = "{{#isMatch name \"post-*\"}}post{{else}}page{{/isMatch}}";
        assert_eq!(render(tpl, &json!({"name": "post-one"})), "post");
    }

    #[test]
    fn test_bad_glob_fails_render() {
        let mut hb = Handlebars::new();
        register(&mut hb);
        let err = hb
            .render_template("{{isMatch \"x\" \"[\"}}", &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("bad glob"));
    }
}
