//! Helpers for embedding code: fenced blocks, gists, and jsfiddles.

use std::fs;

use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::{hash, param};
use hbs_helpers_core::value::render_string;
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// `{{embed filepath language}}` - the file's contents in a fenced code
/// block. The language defaults to the file extension; backticks in markdown
/// content are entity-escaped so the fence survives.
pub struct Embed;

impl ValueHelper for Embed {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let path = param(h, 0)
            .and_then(Json::as_str)
            .ok_or(HelperError::MissingArgument {
                helper: "embed",
                argument: "filepath",
            })?;
        let language = param(h, 1)
            .and_then(Json::as_str)
            .map(String::from)
            .unwrap_or_else(|| {
                path.rsplit('/')
                    .next()
                    .and_then(|name| name.rsplit_once('.'))
                    .map(|(_, ext)| ext.to_string())
                    .unwrap_or_default()
            });
        let mut code = fs::read_to_string(path).map_err(|source| HelperError::Io {
            helper: "embed",
            path: path.to_string(),
            source,
        })?;
        if language == "md" || language == "markdown" {
            code = code.replace('`', "&#x60;");
        }
        Ok(json!(format!("```{language}\n{}\n```\n", code.trim_end())))
    }
}

/// `{{gist id}}`
pub struct Gist;

impl ValueHelper for Gist {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let id = param(h, 0).map(render_string).unwrap_or_default();
        Ok(json!(format!(
            "<script src=\"https://gist.github.com/{id}.js\"></script>"
        )))
    }
}

/// `{{jsfiddle id="ccWP7"}}` - an embed iframe for a jsfiddle. `width`,
/// `height`, `tabs`, and `skin` may be overridden via the hash.
pub struct Jsfiddle;

impl ValueHelper for Jsfiddle {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let id = hash(h, "id")
            .map(render_string)
            .ok_or(HelperError::MissingArgument {
                helper: "jsfiddle",
                argument: "id",
            })?;
        let width = hash(h, "width").map_or_else(|| "100%".to_string(), render_string);
        let height = hash(h, "height").map_or_else(|| "300".to_string(), render_string);
        let skin = hash(h, "skin").map_or_else(|| "/presentation/".to_string(), render_string);
        let tabs = format!(
            "{}{skin}",
            hash(h, "tabs").map_or_else(|| "result,js,html,css".to_string(), render_string)
        );
        let src = format!("http://jsfiddle.net/{id}/embedded/{tabs}");
        // Attributes in sorted order, matching how hash arguments render
        // elsewhere.
        Ok(json!(format!(
            "<iframe allowfullscreen=\"allowfullscreen\" frameborder=\"0\" \
             height=\"{height}\" src=\"{src}\" width=\"{width}\"></iframe>"
        )))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("embed", Box::new(Inline(Embed)));
    hb.register_helper("gist", Box::new(Inline(Gist)));
    hb.register_helper("jsfiddle", Box::new(Inline(Jsfiddle)));
}
