//! Odds and ends.

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable,
};
use serde_json::{Map, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::value::{get_path, type_of};
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// `{{#noop}}...{{/noop}}` - renders its block with the current context
/// unchanged. Useful as a placeholder for a helper that is wired up later.
pub struct Noop;

impl HelperDef for Noop {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        match h.template() {
            Some(t) => t.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

/// `{{option "a.b.c"}}` - resolves a property path against the context's
/// `options` object, with hash arguments taking precedence.
pub struct Option_;

impl ValueHelper for Option_ {
    fn value(&self, h: &Helper<'_, '_>, ctx: &Context) -> Result<Json, HelperError> {
        let Some(path) = param(h, 0).and_then(Json::as_str) else {
            return Ok(Json::Null);
        };
        let mut options = match ctx.data().get("options") {
            Some(Json::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        for (key, val) in h.hash() {
            options.insert((*key).to_string(), val.value().clone());
        }
        Ok(get_path(&Json::Object(options), path)
            .cloned()
            .unwrap_or(Json::Null))
    }
}

/// `{{typeOf value}}` - `"string"`, `"number"`, `"boolean"`, `"object"`, or
/// `"undefined"`.
pub struct TypeOf;

impl ValueHelper for TypeOf {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        // An unresolved context path arrives as a present-but-missing param.
        let name = match h.param(0) {
            None => "undefined",
            Some(p) if p.is_value_missing() => "undefined",
            Some(p) => type_of(Some(p.value())),
        };
        Ok(Json::String(name.to_string()))
    }
}

/// `{{#withHash greeting="hi"}}{{greeting}}{{/withHash}}` - renders the
/// block with the hash arguments as its context, or the inverse block when
/// no hash was given.
pub struct WithHash;

impl HelperDef for WithHash {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        if h.hash().is_empty() {
            return match h.inverse() {
                Some(t) => t.render(r, ctx, rc, out),
                None => Ok(()),
            };
        }
        let Some(template) = h.template() else {
            return Ok(());
        };
        let context: Map<String, Json> = h
            .hash()
            .iter()
            .map(|(key, val)| ((*key).to_string(), val.value().clone()))
            .collect();
        let mut block = BlockContext::new();
        block.set_base_value(Json::Object(context));
        rc.push_block(block);
        let result = template.render(r, ctx, rc, out);
        rc.pop_block();
        result
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("noop", Box::new(Noop));
    hb.register_helper("option", Box::new(Inline(Option_)));
    hb.register_helper("typeOf", Box::new(Inline(TypeOf)));
    hb.register_helper("withHash", Box::new(WithHash));
}
