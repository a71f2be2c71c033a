//! HTML helpers: attribute strings, lists, and tag stripping.

use std::sync::OnceLock;

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable,
};
use regex::Regex;
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::param;
use hbs_helpers_core::value::render_string;
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// Renders a helper's hash arguments as `key="value"` pairs, sorted by key.
fn attributes(h: &Helper<'_, '_>) -> String {
    h.hash()
        .iter()
        .map(|(key, val)| format!("{key}=\"{}\"", render_string(val.value())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `{{attr class="fancy" id="main"}}` - the hash arguments as an HTML
/// attribute string.
pub struct Attr;

impl ValueHelper for Attr {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let rendered = attributes(h);
        Ok(json!(if rendered.is_empty() {
            String::new()
        } else {
            format!(" {rendered}")
        }))
    }
}

/// `{{sanitize str}}` - strips HTML tags.
pub struct Sanitize;

impl ValueHelper for Sanitize {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        static TAG: OnceLock<Regex> = OnceLock::new();
        let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
        match param(h, 0).and_then(Json::as_str) {
            Some(s) => Ok(json!(tag.replace_all(s, "").trim().to_string())),
            None => Ok(json!("")),
        }
    }
}

fn render_list<'reg: 'rc, 'rc>(
    tag: &str,
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    let attrs = attributes(h);
    if attrs.is_empty() {
        out.write(&format!("<{tag}>"))?;
    } else {
        out.write(&format!("<{tag} {attrs}>"))?;
    }
    let items: Vec<Json> = match param(h, 0) {
        Some(Json::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
        None => Vec::new(),
    };
    for item in items {
        out.write("<li>")?;
        match (&item, h.template()) {
            (Json::String(s), _) => out.write(s)?,
            (_, Some(template)) => {
                let mut block = BlockContext::new();
                block.set_base_value(item.clone());
                rc.push_block(block);
                let result = template.render(r, ctx, rc, out);
                rc.pop_block();
                result?;
            }
            (other, None) => out.write(&render_string(other))?,
        }
        out.write("</li>")?;
    }
    out.write(&format!("</{tag}>"))?;
    Ok(())
}

/// `{{#ul items class="list"}}{{name}}{{/ul}}` - an unordered list with one
/// `<li>` per item; string items are inserted as-is, anything else renders
/// the block.
pub struct Ul;

impl HelperDef for Ul {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        render_list("ul", h, r, ctx, rc, out)
    }
}

/// `{{#ol items}}...{{/ol}}` - the ordered variant of [`Ul`].
pub struct Ol;

impl HelperDef for Ol {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        render_list("ol", h, r, ctx, rc, out)
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("attr", Box::new(Inline(Attr)));
    hb.register_helper("ol", Box::new(Ol));
    hb.register_helper("sanitize", Box::new(Inline(Sanitize)));
    hb.register_helper("ul", Box::new(Ul));
}
