//! Identifier generation.

use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};

use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// `{{uuid}}` - a random version 4 UUID.
pub struct Uuid;

impl ValueHelper for Uuid {
    fn value(&self, _h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(json!(::uuid::Uuid::new_v4().to_string()))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("uuid", Box::new(Inline(Uuid)));
}
