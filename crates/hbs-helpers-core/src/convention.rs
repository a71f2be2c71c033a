//! The trailing-metadata invocation convention.
//!
//! Every helper can be called three ways: inline (`{{foo a}}`), as a
//! subexpression (`{{#if (foo a)}}`), or as a block (`{{#foo a}}...{{/foo}}`).
//! Rather than have a hundred helpers each reimplement that dispatch, helper
//! logic is written against one of two small traits and wrapped in an adapter
//! that implements the engine's `HelperDef`:
//!
//! - [`ValueHelper`] computes a JSON value; [`Inline`] renders it as text in
//!   statement position and passes it through untouched in subexpressions.
//! - [`TestHelper`] computes a boolean; [`Conditional`] renders the main or
//!   inverse block when used as a block, the words `true`/`false` inline, and
//!   a JSON boolean in subexpressions.
//!
//! Helpers that iterate a block per element implement `HelperDef` directly
//! and use [`capture_block`]/[`render_bool`] from here.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    Renderable, ScopedJson, StringOutput,
};
use serde_json::Value as Json;

use crate::error::HelperError;
use crate::value;

/// A helper whose result is a JSON value.
pub trait ValueHelper: Send + Sync {
    /// Computes the helper's result from its arguments.
    fn value(&self, h: &Helper<'_, '_>, ctx: &Context) -> Result<Json, HelperError>;
}

/// A helper whose result is a yes/no decision.
pub trait TestHelper: Send + Sync {
    /// Evaluates the helper's condition against its arguments.
    fn test(&self, h: &Helper<'_, '_>, ctx: &Context) -> Result<bool, HelperError>;
}

/// Adapter registering a [`ValueHelper`] with the engine.
pub struct Inline<T: ValueHelper>(pub T);

impl<T: ValueHelper> HelperDef for Inline<T> {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let computed = self.0.value(h, ctx)?;
        Ok(ScopedJson::Derived(computed))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let computed = self.0.value(h, ctx)?;
        out.write(&value::render_string(&computed))?;
        Ok(())
    }
}

/// Adapter registering a [`TestHelper`] with the engine.
pub struct Conditional<T: TestHelper>(pub T);

impl<T: TestHelper> HelperDef for Conditional<T> {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let outcome = self.0.test(h, ctx)?;
        Ok(ScopedJson::Derived(Json::Bool(outcome)))
    }

    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let outcome = self.0.test(h, ctx)?;
        render_bool(outcome, h, r, ctx, rc, out)
    }
}

/// Renders a boolean outcome according to call position: the main or inverse
/// block when called as a block helper, the literal words `true`/`false`
/// otherwise.
pub fn render_bool<'reg: 'rc, 'rc>(
    outcome: bool,
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    if h.is_block() {
        let template = if outcome { h.template() } else { h.inverse() };
        match template {
            Some(t) => t.render(r, ctx, rc, out),
            None => Ok(()),
        }
    } else {
        out.write(if outcome { "true" } else { "false" })?;
        Ok(())
    }
}

/// Renders a helper's block body into a string, for helpers that post-process
/// their block content. Returns the empty string when there is no body.
pub fn capture_block<'reg: 'rc, 'rc>(
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
) -> Result<String, RenderError> {
    match h.template() {
        Some(t) => {
            let mut buf = StringOutput::new();
            t.render(r, ctx, rc, &mut buf)?;
            Ok(buf.into_string()?)
        }
        None => Ok(String::new()),
    }
}

/// The value of the positional argument at `index`, if present.
pub fn param<'a>(h: &'a Helper<'_, '_>, index: usize) -> Option<&'a Json> {
    h.param(index).map(handlebars::PathAndJson::value)
}

/// The value of the named hash argument `key`, if present.
pub fn hash<'a>(h: &'a Helper<'_, '_>, key: &str) -> Option<&'a Json> {
    h.hash_get(key).map(handlebars::PathAndJson::value)
}

/// The positional argument at `index`, or an error naming it.
pub fn require_param<'a>(
    h: &'a Helper<'_, '_>,
    helper: &'static str,
    index: usize,
    name: &'static str,
) -> Result<&'a Json, HelperError> {
    param(h, index).ok_or(HelperError::MissingArgument {
        helper,
        argument: name,
    })
}

/// The second operand of a two-sided comparison: the second positional
/// argument, or the `compare=` hash argument when only one was given.
pub fn second_operand<'a>(h: &'a Helper<'_, '_>) -> Option<&'a Json> {
    param(h, 1).or_else(|| hash(h, "compare"))
}
