//! Helpers that accept arrays and objects alike.

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable,
};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::value::is_empty;
use hbs_helpers_core::{Conditional, HelperError, TestHelper};

/// `{{#isEmpty collection}}...{{else}}...{{/isEmpty}}` - true for `null`,
/// empty strings, arrays, and objects. Numbers and booleans are never empty.
pub struct IsEmpty;

impl TestHelper for IsEmpty {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(param(h, 0).map_or(true, is_empty))
    }
}

/// `{{#iterate collection}}...{{else}}...{{/iterate}}` - iterates array items
/// with `@index`, object entries with `@key`. Anything else renders the
/// inverse block.
pub struct Iterate;

impl HelperDef for Iterate {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let Some(template) = h.template() else {
            return Ok(());
        };
        match param(h, 0) {
            Some(Json::Array(items)) if !items.is_empty() => {
                for (i, item) in items.iter().enumerate() {
                    let mut block = BlockContext::new();
                    block.set_base_value(item.clone());
                    block.set_local_var("index", json!(i));
                    rc.push_block(block);
                    let result = template.render(r, ctx, rc, out);
                    rc.pop_block();
                    result?;
                }
                Ok(())
            }
            Some(Json::Object(map)) if !map.is_empty() => {
                for (key, val) in map {
                    let mut block = BlockContext::new();
                    block.set_base_value(val.clone());
                    block.set_local_var("key", json!(key));
                    rc.push_block(block);
                    let result = template.render(r, ctx, rc, out);
                    rc.pop_block();
                    result?;
                }
                Ok(())
            }
            _ => match h.inverse() {
                Some(t) => t.render(r, ctx, rc, out),
                None => Ok(()),
            },
        }
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("isEmpty", Box::new(Conditional(IsEmpty)));
    hb.register_helper("iterate", Box::new(Iterate));
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
    fn test_is_empty() {
        let tpl = "{{#isEmpty v}}empty{{else}}full{{/isEmpty}}";
        assert_eq!(render(tpl, &json!({"v": []})), "empty");
        assert_eq!(render(tpl, &json!({"v": ""})), "empty");
        assert_eq!(render(tpl, &json!({"v": {}})), "empty");
        assert_eq!(render(tpl, &json!({})), "empty");
        assert_eq!(render(tpl, &json!({"v": 0})), "full");
        assert_eq!(render(tpl, &json!({"v": [1]})), "full");
        assert_eq!(render("{{isEmpty v}}", &json!({"v": []})), "true");
    }

    #[test]
    fn test_iterate_array() {
        assert_eq!(
            render("{{#iterate list}}{{@index}}:{{this}} {{/iterate}}", &json!({"list": ["a", "b"]})),
            "0:a 1:b "
        );
    }

    #[test]
    fn test_iterate_object() {
        assert_eq!(
            render("{{#iterate obj}}{{@key}}={{this}} {{/iterate}}", &json!({"obj": {"a": 1, "b": 2}})),
            "a=1 b=2 "
        );
    }

    #[test]
    fn test_iterate_other_renders_inverse() {
        assert_eq!(
            render("{{#iterate n}}item{{else}}nothing{{/iterate}}", &json!({"n": 42})),
            "nothing"
        );
    }
}
