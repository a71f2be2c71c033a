//! Object helpers: property access, merging, picking, JSON conversion.

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderError, Renderable, ScopedJson,
};
use serde_json::{json, Map, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::value::{get_path, render_string};
use hbs_helpers_core::{Conditional, HelperError, Inline, TestHelper, ValueHelper};

fn object_arg<'a>(h: &'a Helper<'_, '_>, index: usize) -> Option<&'a Map<String, Json>> {
    match param(h, index) {
        Some(Json::Object(map)) => Some(map),
        _ => None,
    }
}

fn deep_merge(target: &mut Map<String, Json>, source: &Map<String, Json>) {
    for (key, incoming) in source {
        match (target.get_mut(key), incoming) {
            (Some(Json::Object(existing)), Json::Object(nested)) => deep_merge(existing, nested),
            _ => {
                target.insert(key.clone(), incoming.clone());
            }
        }
    }
}

/// `{{extend obj1 obj2 key=val}}` - shallow merge of the given objects and
/// any hash arguments, later sources winning.
pub struct Extend;

impl ValueHelper for Extend {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let mut merged = Map::new();
        for p in h.params() {
            if let Json::Object(map) = p.value() {
                for (key, val) in map {
                    merged.insert(key.clone(), val.clone());
                }
            }
        }
        for (key, val) in h.hash() {
            merged.insert((*key).to_string(), val.value().clone());
        }
        Ok(Json::Object(merged))
    }
}

/// `{{merge obj1 obj2}}` - like `extend`, but merges nested objects
/// recursively.
pub struct Merge;

impl ValueHelper for Merge {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let mut merged = Map::new();
        for p in h.params() {
            if let Json::Object(map) = p.value() {
                deep_merge(&mut merged, map);
            }
        }
        Ok(Json::Object(merged))
    }
}

/// `{{#forOwn obj}}...{{/forOwn}}` - block per entry, with the value as
/// context and `@key` set.
pub struct ForOwn;

impl HelperDef for ForOwn {
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
        let entries: Vec<(String, Json)> = object_arg(h, 0)
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        if entries.is_empty() {
            return match h.inverse() {
                Some(t) => t.render(r, ctx, rc, out),
                None => Ok(()),
            };
        }
        for (key, val) in entries {
            let mut block = BlockContext::new();
            block.set_base_value(val);
            block.set_local_var("key", json!(key));
            rc.push_block(block);
            let result = template.render(r, ctx, rc, out);
            rc.pop_block();
            result?;
        }
        Ok(())
    }
}

/// `{{get prop obj}}` - resolves a dotted property path. As a block helper,
/// renders the block with the value as context, or the inverse block when
/// the path is missing.
pub struct Get;

impl HelperDef for Get {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        Ok(ScopedJson::Derived(lookup(h).unwrap_or(Json::Null)))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let found = lookup(h);
        if h.is_block() {
            match (found, h.template()) {
                (Some(val), Some(template)) => {
                    let mut block = BlockContext::new();
                    block.set_base_value(val);
                    rc.push_block(block);
                    let result = template.render(r, ctx, rc, out);
                    rc.pop_block();
                    result
                }
                _ => match h.inverse() {
                    Some(t) => t.render(r, ctx, rc, out),
                    None => Ok(()),
                },
            }
        } else {
            if let Some(val) = found {
                out.write(&render_string(&val))?;
            }
            Ok(())
        }
    }
}

fn lookup(h: &Helper<'_, '_>) -> Option<Json> {
    let path = param(h, 0).and_then(Json::as_str)?;
    get_path(param(h, 1)?, path).cloned()
}

/// `{{getObject prop obj}}` - like `get`, but returns the terminal
/// key/value pair as a one-entry object.
pub struct GetObject;

impl ValueHelper for GetObject {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(path) = param(h, 0).and_then(Json::as_str) else {
            return Ok(Json::Null);
        };
        let Some(found) = param(h, 1).and_then(|obj| get_path(obj, path)) else {
            return Ok(Json::Null);
        };
        let last = path.rsplit('.').next().unwrap_or(path);
        Ok(json!({ last: found }))
    }
}

/// `{{#hasOwn obj key}}...{{/hasOwn}}`
pub struct HasOwn;

impl TestHelper for HasOwn {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let key = param(h, 1).map(render_string).unwrap_or_default();
        Ok(object_arg(h, 0).is_some_and(|map| map.contains_key(&key)))
    }
}

/// `{{#isObject value}}...{{/isObject}}`
pub struct IsObject;

impl TestHelper for IsObject {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(matches!(param(h, 0), Some(Json::Object(_))))
    }
}

/// `{{parseJSON str}}` - parses a JSON string into a value; malformed input
/// fails the render.
pub struct ParseJson;

impl ValueHelper for ParseJson {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(text) = param(h, 0).and_then(Json::as_str) else {
            return Ok(Json::Null);
        };
        serde_json::from_str(text).map_err(|e| HelperError::Parse {
            helper: "parseJSON",
            message: e.to_string(),
        })
    }
}

/// `{{stringify obj}}` - serializes to JSON text; `indent` > 0 pretty-prints.
pub struct Stringify;

impl ValueHelper for Stringify {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(input) = param(h, 0) else {
            return Ok(json!(""));
        };
        let pretty = param(h, 1)
            .and_then(hbs_helpers_core::value::as_f64)
            .is_some_and(|n| n > 0.0);
        let text = if pretty {
            serde_json::to_string_pretty(input)
        } else {
            serde_json::to_string(input)
        };
        text.map(Json::String).map_err(|e| HelperError::Parse {
            helper: "stringify",
            message: e.to_string(),
        })
    }
}

/// `{{#pick keys obj}}...{{else}}...{{/pick}}` - a copy of `obj` with only
/// the named keys. `keys` may be a string or an array of strings.
pub struct Pick;

impl HelperDef for Pick {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        Ok(ScopedJson::Derived(Json::Object(picked(h))))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let result = picked(h);
        if h.is_block() {
            if result.is_empty() {
                return match h.inverse() {
                    Some(t) => t.render(r, ctx, rc, out),
                    None => Ok(()),
                };
            }
            let Some(template) = h.template() else {
                return Ok(());
            };
            let mut block = BlockContext::new();
            block.set_base_value(Json::Object(result));
            rc.push_block(block);
            let rendered = template.render(r, ctx, rc, out);
            rc.pop_block();
            rendered
        } else {
            out.write(&render_string(&Json::Object(result)))?;
            Ok(())
        }
    }
}

fn picked(h: &Helper<'_, '_>) -> Map<String, Json> {
    let keys: Vec<String> = match param(h, 0) {
        Some(Json::String(s)) => vec![s.clone()],
        Some(Json::Array(items)) => items.iter().map(render_string).collect(),
        _ => Vec::new(),
    };
    let mut result = Map::new();
    if let Some(map) = object_arg(h, 1) {
        for key in keys {
            if let Some(val) = map.get(&key) {
                result.insert(key, val.clone());
            }
        }
    }
    result
}

/// `{{toPath segments...}}` - joins the arguments into a dotted property
/// path.
pub struct ToPath;

impl ValueHelper for ToPath {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let segments: Vec<String> = h.params().iter().map(|p| render_string(p.value())).collect();
        Ok(json!(segments.join(".")))
    }
}

/// Registers the object helpers. `forIn` behaves like `forOwn` (JSON values
/// have no inherited properties), and `JSONparse`/`JSONstringify` are the
/// older names for `parseJSON`/`stringify`.
pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("JSONparse", Box::new(Inline(ParseJson)));
    hb.register_helper("JSONstringify", Box::new(Inline(Stringify)));
    hb.register_helper("extend", Box::new(Inline(Extend)));
    hb.register_helper("forIn", Box::new(ForOwn));
    hb.register_helper("forOwn", Box::new(ForOwn));
    hb.register_helper("get", Box::new(Get));
    hb.register_helper("getObject", Box::new(Inline(GetObject)));
    hb.register_helper("hasOwn", Box::new(Conditional(HasOwn)));
    hb.register_helper("isObject", Box::new(Conditional(IsObject)));
    hb.register_helper("merge", Box::new(Inline(Merge)));
    hb.register_helper("parseJSON", Box::new(Inline(ParseJson)));
    hb.register_helper("pick", Box::new(Pick));
    hb.register_helper("stringify", Box::new(Inline(Stringify)));
    hb.register_helper("toPath", Box::new(Inline(ToPath)));
}
