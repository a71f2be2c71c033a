//! Language table lookup.

use handlebars::{Context, Handlebars, Helper};
use serde_json::Value as Json;

use hbs_helpers_core::convention::{hash, param};
use hbs_helpers_core::value::{get_path, render_string};
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// `{{i18n key language="es"}}` - looks `key` up in the context's table for
/// the chosen language. The language comes from the `language` (or `lang`)
/// hash argument, then the same fields on the context, then `"en"`.
///
/// Unlike most helpers this one fails fast: a missing table or key is a
/// template bug worth surfacing, not something to render as empty.
pub struct I18n;

impl ValueHelper for I18n {
    fn value(&self, h: &Helper<'_, '_>, ctx: &Context) -> Result<Json, HelperError> {
        let key = param(h, 0)
            .and_then(Json::as_str)
            .ok_or(HelperError::Type {
                helper: "i18n",
                expected: "a string key",
                received: param(h, 0).map(render_string).unwrap_or_default(),
            })?;
        let language = hash(h, "language")
            .or_else(|| hash(h, "lang"))
            .or_else(|| ctx.data().get("language"))
            .or_else(|| ctx.data().get("lang"))
            .map_or_else(|| Ok("en".to_string()), |v| match v {
                Json::String(s) => Ok(s.clone()),
                other => Err(HelperError::Type {
                    helper: "i18n",
                    expected: "a string language code",
                    received: render_string(other),
                }),
            })?;
        let table = ctx.data().get(&language).ok_or_else(|| HelperError::Lookup {
            helper: "i18n",
            message: format!("no translations for language `{language}`"),
        })?;
        let found = get_path(table, key).ok_or_else(|| HelperError::Lookup {
            helper: "i18n",
            message: format!("`{key}` not found in language `{language}`"),
        })?;
        Ok(found.clone())
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("i18n", Box::new(Inline(I18n)));
}
