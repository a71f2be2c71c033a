//! URL helpers: percent-encoding, parsing, and resolution.

use handlebars::{Context, Handlebars, Helper};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value as Json};
use tracing::warn;
use url::Url;

use hbs_helpers_core::convention::param;
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// Everything except the characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Everything except the characters query-string escaping leaves alone.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn str_arg<'a>(h: &'a Helper<'_, '_>, index: usize) -> Option<&'a str> {
    param(h, index).and_then(Json::as_str)
}

/// `{{encodeURI str}}` - percent-encodes a URI component.
pub struct EncodeUri;

impl ValueHelper for EncodeUri {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(utf8_percent_encode(s, URI_COMPONENT).to_string())),
            None => Ok(Json::Null),
        }
    }
}

/// `{{escape str}}` - percent-encodes for use in a query string.
pub struct Escape;

impl ValueHelper for Escape {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(utf8_percent_encode(s, QUERY).to_string())),
            None => Ok(Json::Null),
        }
    }
}

/// `{{decodeURI str}}`
pub struct DecodeUri;

impl ValueHelper for DecodeUri {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(percent_decode_str(s).decode_utf8_lossy())),
            None => Ok(Json::Null),
        }
    }
}

/// `{{urlResolve base href}}` - resolves `href` against `base` the way a
/// browser would. Falls back to `href` when `base` does not parse.
pub struct UrlResolve;

impl ValueHelper for UrlResolve {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let (Some(base), Some(href)) = (str_arg(h, 0), str_arg(h, 1)) else {
            return Ok(Json::Null);
        };
        let resolved = match Url::parse(base).and_then(|b| b.join(href)) {
            Ok(u) => u.to_string(),
            Err(e) => {
                warn!(base, href, error = %e, "urlResolve falling back to href");
                href.to_string()
            }
        };
        Ok(json!(resolved))
    }
}

/// `{{urlParse str}}` - breaks a URL into its parts: `protocol`, `hostname`,
/// `port`, `pathname`, `search`, `query`, `hash`, `host`, and `href`.
pub struct UrlParse;

impl ValueHelper for UrlParse {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(s) = str_arg(h, 0) else {
            return Ok(Json::Null);
        };
        let parsed = Url::parse(s).map_err(|e| HelperError::Parse {
            helper: "urlParse",
            message: format!("`{s}`: {e}"),
        })?;
        let query = parsed.query().map(String::from);
        Ok(json!({
            "protocol": format!("{}:", parsed.scheme()),
            "hostname": parsed.host_str(),
            "port": parsed.port(),
            "host": parsed.host_str().map(|host| match parsed.port() {
                Some(p) => format!("{host}:{p}"),
                None => host.to_string(),
            }),
            "pathname": parsed.path(),
            "search": query.as_ref().map(|q| format!("?{q}")),
            "query": query,
            "hash": parsed.fragment().map(|f| format!("#{f}")),
            "href": parsed.as_str(),
        }))
    }
}

/// `{{stripQuerystring url}}`
pub struct StripQuerystring;

impl ValueHelper for StripQuerystring {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(s.split('?').next().unwrap_or(s))),
            None => Ok(Json::Null),
        }
    }
}

/// `{{stripProtocol url}}` - `http://example.com/a` becomes
/// `//example.com/a`, so the page's protocol decides.
pub struct StripProtocol;

impl ValueHelper for StripProtocol {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(s) = str_arg(h, 0) else {
            return Ok(Json::Null);
        };
        match s.find("://") {
            Some(i) if s[..i].chars().all(|c| c.is_ascii_alphanumeric() || "+.-".contains(c)) => {
                Ok(json!(format!("//{}", &s[i + 3..])))
            }
            _ => Ok(json!(s)),
        }
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("decodeURI", Box::new(Inline(DecodeUri)));
    hb.register_helper("encodeURI", Box::new(Inline(EncodeUri)));
    hb.register_helper("escape", Box::new(Inline(Escape)));
    hb.register_helper("stripProtocol", Box::new(Inline(StripProtocol)));
    hb.register_helper("stripQuerystring", Box::new(Inline(StripQuerystring)));
    hb.register_helper("urlParse", Box::new(Inline(UrlParse)));
    hb.register_helper("urlResolve", Box::new(Inline(UrlResolve)));
}
