//! Array helpers: slicing, sorting, filtering, and block iteration.
//!
//! Iterating helpers render their block once per item with the item as the
//! context and `@index` set, and fall back to the `{{else}}` section when the
//! list is empty. Non-array input renders as empty rather than failing.

use std::cmp::Ordering;

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable,
};
use serde_json::{json, Map, Value as Json};

use hbs_helpers_core::convention::{hash, param};
use hbs_helpers_core::value::{self, get_path, render_string};
use hbs_helpers_core::{Conditional, HelperError, Inline, TestHelper, ValueHelper};

fn array_arg<'a>(h: &'a Helper<'_, '_>, index: usize) -> Option<&'a Vec<Json>> {
    match param(h, index) {
        Some(Json::Array(items)) => Some(items),
        _ => None,
    }
}

fn index_arg(h: &Helper<'_, '_>, index: usize) -> Option<usize> {
    param(h, index)
        .and_then(value::as_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
}

/// Renders the helper's block once per item, with the item as context and
/// `@index` set. Renders the inverse block when there are no items.
fn render_items<'reg: 'rc, 'rc>(
    items: &[Json],
    h: &Helper<'reg, 'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    if items.is_empty() {
        return match h.inverse() {
            Some(t) => t.render(r, ctx, rc, out),
            None => Ok(()),
        };
    }
    let Some(template) = h.template() else {
        return Ok(());
    };
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

/// `{{after array n}}` - everything after the first `n` items.
pub struct After;

impl ValueHelper for After {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (array_arg(h, 0), index_arg(h, 1)) {
            (Some(items), Some(n)) => Ok(json!(items[n.min(items.len())..])),
            (Some(items), None) => Ok(json!(items)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{before array n}}` - everything but the last `n` items.
pub struct Before;

impl ValueHelper for Before {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (array_arg(h, 0), index_arg(h, 1)) {
            (Some(items), Some(n)) => Ok(json!(items[..items.len().saturating_sub(n)])),
            (Some(items), None) => Ok(json!(items)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{arrayify value}}` - wraps a non-array value in an array; `null` becomes
/// `[]`.
pub struct Arrayify;

impl ValueHelper for Arrayify {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match param(h, 0) {
            None | Some(Json::Null) => Ok(json!([])),
            Some(Json::Array(items)) => Ok(json!(items)),
            Some(other) => Ok(json!([other])),
        }
    }
}

/// `{{#eachIndex array}}...{{/eachIndex}}` - like `each`, exposing the item
/// as `item` and its position as `index`.
pub struct EachIndex;

impl HelperDef for EachIndex {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let wrapped: Vec<Json> = array_arg(h, 0)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| json!({"item": item, "index": i}))
                    .collect()
            })
            .unwrap_or_default();
        render_items(&wrapped, h, r, ctx, rc, out)
    }
}

/// `{{#filter array value}}...{{else}}...{{/filter}}` - renders the block for
/// every matching item, comparing whole items or the `property=` hash path.
pub struct Filter;

impl HelperDef for Filter {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let target = param(h, 1).cloned().unwrap_or(Json::Null);
        let matches: Vec<Json> = array_arg(h, 0)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| match hash(h, "property").and_then(Json::as_str) {
                        Some(path) => {
                            get_path(item, path).is_some_and(|v| value::strict_eq(v, &target))
                        }
                        None => value::strict_eq(item, &target),
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        render_items(&matches, h, r, ctx, rc, out)
    }
}

/// `{{first array n}}` - the first item, or the first `n` items when `n` is
/// given.
pub struct First;

impl ValueHelper for First {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(items) = array_arg(h, 0) else {
            return Ok(Json::Null);
        };
        match index_arg(h, 1) {
            Some(n) => Ok(json!(items[..n.min(items.len())])),
            None => Ok(items.first().cloned().unwrap_or(Json::Null)),
        }
    }
}

/// `{{last value n}}` - the last item (or character), or the last `n`.
pub struct Last;

impl ValueHelper for Last {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match param(h, 0) {
            Some(Json::Array(items)) => match index_arg(h, 1) {
                Some(n) => Ok(json!(items[items.len().saturating_sub(n)..])),
                None => Ok(items.last().cloned().unwrap_or(Json::Null)),
            },
            Some(Json::String(s)) => {
                let n = index_arg(h, 1).unwrap_or(1);
                let chars: Vec<char> = s.chars().collect();
                let tail: String = chars[chars.len().saturating_sub(n)..].iter().collect();
                Ok(json!(tail))
            }
            _ => Ok(json!("")),
        }
    }
}

/// `{{#forEach array}}...{{else}}...{{/forEach}}` - iterates, giving each
/// object item `index`, `total`, `isFirst` and `isLast` properties.
pub struct ForEach;

impl HelperDef for ForEach {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let decorated: Vec<Json> = array_arg(h, 0)
            .map(|items| {
                let total = items.len();
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Json::Object(map) => {
                            let mut map: Map<String, Json> = map.clone();
                            map.insert("index".into(), json!(i + 1));
                            map.insert("total".into(), json!(total));
                            map.insert("isFirst".into(), json!(i == 0));
                            map.insert("isLast".into(), json!(i == total - 1));
                            Json::Object(map)
                        }
                        other => other.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        render_items(&decorated, h, r, ctx, rc, out)
    }
}

/// `{{#inArray array value}}...{{else}}...{{/inArray}}`
pub struct InArray;

impl TestHelper for InArray {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let target = param(h, 1).cloned().unwrap_or(Json::Null);
        Ok(array_arg(h, 0)
            .is_some_and(|items| items.iter().any(|item| value::strict_eq(item, &target))))
    }
}

/// `{{#isArray value}}...{{/isArray}}`
pub struct IsArray;

impl TestHelper for IsArray {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(matches!(param(h, 0), Some(Json::Array(_))))
    }
}

/// `{{itemAt array idx}}`
pub struct ItemAt;

impl ValueHelper for ItemAt {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let idx = index_arg(h, 1).unwrap_or(0);
        Ok(array_arg(h, 0)
            .and_then(|items| items.get(idx))
            .cloned()
            .unwrap_or(Json::Null))
    }
}

/// `{{join array separator}}` - joins with `", "` by default. Strings pass
/// through unchanged.
pub struct Join;

impl ValueHelper for Join {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match param(h, 0) {
            Some(Json::String(s)) => Ok(json!(s)),
            Some(Json::Array(items)) => {
                let sep = param(h, 1).and_then(Json::as_str).unwrap_or(", ");
                let joined = items.iter().map(render_string).collect::<Vec<_>>().join(sep);
                Ok(json!(joined))
            }
            _ => Ok(json!("")),
        }
    }
}

/// `{{#equalsLength value length}}...{{else}}...{{/equalsLength}}`
pub struct EqualsLength;

impl TestHelper for EqualsLength {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        let wanted = index_arg(h, 1).or_else(|| {
            hash(h, "length")
                .and_then(value::as_f64)
                .filter(|n| *n >= 0.0)
                .map(|n| n as usize)
        });
        match (param(h, 0).and_then(value::len_of), wanted) {
            (Some(actual), Some(expected)) => Ok(actual == expected),
            _ => Ok(false),
        }
    }
}

/// `{{length value}}` - items in an array, keys in an object, characters in
/// a string. A string holding a JSON array counts its elements.
pub struct Length;

impl ValueHelper for Length {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(input) = param(h, 0) else {
            return Ok(json!(0));
        };
        if let Json::String(s) = input {
            if s.trim_start().starts_with('[') {
                if let Ok(Json::Array(items)) = serde_json::from_str::<Json>(s) {
                    return Ok(json!(items.len()));
                }
            }
        }
        Ok(json!(value::len_of(input).unwrap_or(0)))
    }
}

/// `{{pluck array prop}}` - collects `prop` from each item, skipping items
/// where it is missing.
pub struct Pluck;

impl ValueHelper for Pluck {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(path) = param(h, 1).and_then(Json::as_str) else {
            return Ok(json!([]));
        };
        let plucked: Vec<Json> = array_arg(h, 0)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| get_path(item, path))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(json!(plucked))
    }
}

/// `{{reverse value}}` - reverses an array or a string.
pub struct Reverse;

impl ValueHelper for Reverse {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match param(h, 0) {
            Some(Json::Array(items)) => {
                Ok(json!(items.iter().rev().cloned().collect::<Vec<_>>()))
            }
            Some(Json::String(s)) => Ok(json!(s.chars().rev().collect::<String>())),
            _ => Ok(Json::Null),
        }
    }
}

fn compare_items(a: &Json, b: &Json) -> Ordering {
    value::compare(a, b).unwrap_or_else(|| render_string(a).cmp(&render_string(b)))
}

/// `{{sort array reverse=true}}` - sorts; numbers numerically, everything
/// else by rendered text.
pub struct Sort;

impl ValueHelper for Sort {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(items) = array_arg(h, 0) else {
            return Ok(Json::Null);
        };
        let mut sorted = items.clone();
        sorted.sort_by(compare_items);
        if hash(h, "reverse").is_some_and(value::truthy) {
            sorted.reverse();
        }
        Ok(json!(sorted))
    }
}

fn sort_by_prop(items: &[Json], path: &str) -> Vec<Json> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        match (get_path(a, path), get_path(b, path)) {
            (Some(x), Some(y)) => compare_items(x, y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted
}

/// `{{sortBy array prop}}` - sorts objects by a (possibly dotted) property.
pub struct SortBy;

impl ValueHelper for SortBy {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(items) = array_arg(h, 0) else {
            return Ok(Json::Null);
        };
        match param(h, 1).and_then(Json::as_str) {
            Some(path) => Ok(json!(sort_by_prop(items, path))),
            None => {
                let mut sorted = items.clone();
                sorted.sort_by(compare_items);
                Ok(json!(sorted))
            }
        }
    }
}

/// `{{unique array}}` - removes duplicates, keeping first occurrences.
pub struct Unique;

impl ValueHelper for Unique {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let mut seen: Vec<Json> = Vec::new();
        if let Some(items) = array_arg(h, 0) {
            for item in items {
                if !seen.iter().any(|s| value::strict_eq(s, item)) {
                    seen.push(item.clone());
                }
            }
        }
        Ok(json!(seen))
    }
}

/// `{{#withAfter array idx}}...{{/withAfter}}` - block over items after `idx`.
pub struct WithAfter;

impl HelperDef for WithAfter {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let slice: Vec<Json> = match (array_arg(h, 0), index_arg(h, 1)) {
            (Some(items), Some(n)) => items[n.min(items.len())..].to_vec(),
            _ => Vec::new(),
        };
        render_items(&slice, h, r, ctx, rc, out)
    }
}

/// `{{#withBefore array idx}}...{{/withBefore}}` - block over all but the
/// last `idx` items.
pub struct WithBefore;

impl HelperDef for WithBefore {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let slice: Vec<Json> = match (array_arg(h, 0), index_arg(h, 1)) {
            (Some(items), Some(n)) => items[..items.len().saturating_sub(n)].to_vec(),
            _ => Vec::new(),
        };
        render_items(&slice, h, r, ctx, rc, out)
    }
}

/// `{{#withFirst array n}}...{{/withFirst}}` - block over the first item or
/// first `n` items.
pub struct WithFirst;

impl HelperDef for WithFirst {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let slice: Vec<Json> = array_arg(h, 0)
            .map(|items| {
                let n = index_arg(h, 1).unwrap_or(1);
                items[..n.min(items.len())].to_vec()
            })
            .unwrap_or_default();
        render_items(&slice, h, r, ctx, rc, out)
    }
}

/// `{{#withLast array n}}...{{/withLast}}` - block over the last item or last
/// `n` items.
pub struct WithLast;

impl HelperDef for WithLast {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let slice: Vec<Json> = array_arg(h, 0)
            .map(|items| {
                let n = index_arg(h, 1).unwrap_or(1);
                items[items.len().saturating_sub(n)..].to_vec()
            })
            .unwrap_or_default();
        render_items(&slice, h, r, ctx, rc, out)
    }
}

/// `{{#withSort array prop reverse=true}}...{{/withSort}}` - block over the
/// sorted array.
pub struct WithSort;

impl HelperDef for WithSort {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let mut sorted: Vec<Json> = array_arg(h, 0)
            .map(|items| match param(h, 1).and_then(Json::as_str) {
                Some(path) => sort_by_prop(items, path),
                None => {
                    let mut s = items.clone();
                    s.sort_by(compare_items);
                    s
                }
            })
            .unwrap_or_default();
        if hash(h, "reverse").is_some_and(value::truthy) {
            sorted.reverse();
        }
        render_items(&sorted, h, r, ctx, rc, out)
    }
}

/// Registers the array helpers. `lengthEqual` is the older alias for
/// `equalsLength`.
pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("after", Box::new(Inline(After)));
    hb.register_helper("arrayify", Box::new(Inline(Arrayify)));
    hb.register_helper("before", Box::new(Inline(Before)));
    hb.register_helper("eachIndex", Box::new(EachIndex));
    hb.register_helper("equalsLength", Box::new(Conditional(EqualsLength)));
    hb.register_helper("filter", Box::new(Filter));
    hb.register_helper("first", Box::new(Inline(First)));
    hb.register_helper("forEach", Box::new(ForEach));
    hb.register_helper("inArray", Box::new(Conditional(InArray)));
    hb.register_helper("isArray", Box::new(Conditional(IsArray)));
    hb.register_helper("itemAt", Box::new(Inline(ItemAt)));
    hb.register_helper("join", Box::new(Inline(Join)));
    hb.register_helper("last", Box::new(Inline(Last)));
    hb.register_helper("length", Box::new(Inline(Length)));
    hb.register_helper("lengthEqual", Box::new(Conditional(EqualsLength)));
    hb.register_helper("pluck", Box::new(Inline(Pluck)));
    hb.register_helper("reverse", Box::new(Inline(Reverse)));
    hb.register_helper("sort", Box::new(Inline(Sort)));
    hb.register_helper("sortBy", Box::new(Inline(SortBy)));
    hb.register_helper("unique", Box::new(Inline(Unique)));
    hb.register_helper("withAfter", Box::new(WithAfter));
    hb.register_helper("withBefore", Box::new(WithBefore));
    hb.register_helper("withFirst", Box::new(WithFirst));
    hb.register_helper("withLast", Box::new(WithLast));
    hb.register_helper("withSort", Box::new(WithSort));
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

    fn letters() -> Json {
        json!({"array": ["a", "b", "c", "d", "e"]})
    }

    // ── Slicing ─────────────────────────────────────────────────────

    #[test]
    fn test_after_before() {
        assert_eq!(render("{{after array 3}}", &letters()), "d,e");
        assert_eq!(render("{{before array 3}}", &letters()), "a,b");
        assert_eq!(render("{{after array 9}}", &letters()), "");
    }

    #[test]
    fn test_first_last() {
        assert_eq!(render("{{first array}}", &letters()), "a");
        assert_eq!(render("{{first array 2}}", &letters()), "a,b");
        assert_eq!(render("{{last array}}", &letters()), "e");
        assert_eq!(render("{{last array 2}}", &letters()), "d,e");
        assert_eq!(render("{{last \"tunneling\" 3}}", &json!({})), "ing");
    }

    #[test]
    fn test_item_at() {
        assert_eq!(render("{{itemAt array 1}}", &letters()), "b");
        assert_eq!(render("{{itemAt array}}", &letters()), "a");
        assert_eq!(render("{{itemAt array 99}}", &letters()), "");
    }

    // ── Shaping ─────────────────────────────────────────────────────

    #[test]
    fn test_arrayify() {
        assert_eq!(render("{{#each (arrayify \"a\")}}<{{this}}>{{/each}}", &json!({})), "<a>");
        assert_eq!(render("{{#each (arrayify list)}}<{{this}}>{{/each}}", &json!({"list": ["a", "b"]})), "<a><b>");
        assert_eq!(render("{{arrayify missing}}", &json!({})), "");
    }

    #[test]
    fn test_join() {
        assert_eq!(render("{{join array}}", &letters()), "a, b, c, d, e");
        assert_eq!(render("{{join array \"-\"}}", &letters()), "a-b-c-d-e");
        assert_eq!(render("{{join \"solo\"}}", &json!({})), "solo");
    }

    #[test]
    fn test_reverse() {
        assert_eq!(render("{{reverse array}}", &json!({"array": [1, 2, 3]})), "3,2,1");
        assert_eq!(render("{{reverse \"abc\"}}", &json!({})), "cba");
    }

    #[test]
    fn test_unique() {
        assert_eq!(render("{{unique array}}", &json!({"array": ["a", "b", "a", "c", "b"]})), "a,b,c");
    }

    #[test]
    fn test_pluck() {
        let data = json!({"users": [{"name": "ana"}, {"name": "bo"}, {"age": 3}]});
        assert_eq!(render("{{pluck users \"name\"}}", &data), "ana,bo");
    }

    // ── Sorting ─────────────────────────────────────────────────────

    #[test]
    fn test_sort() {
        assert_eq!(render("{{sort array}}", &json!({"array": ["b", "c", "a"]})), "a,b,c");
        assert_eq!(
            render("{{sort array reverse=true}}", &json!({"array": ["b", "c", "a"]})),
            "c,b,a"
        );
        assert_eq!(render("{{sort array}}", &json!({"array": [10, 2, 33]})), "2,10,33");
    }

    #[test]
    fn test_sort_by() {
        let data = json!({"posts": [{"views": 9}, {"views": 2}, {"views": 5}]});
        assert_eq!(render("{{pluck (sortBy posts \"views\") \"views\"}}", &data), "2,5,9");
    }

    // ── Length ──────────────────────────────────────────────────────

    #[test]
    fn test_length() {
        assert_eq!(render("{{length array}}", &letters()), "5");
        assert_eq!(render("{{length \"hello\"}}", &json!({})), "5");
        assert_eq!(render("{{length obj}}", &json!({"obj": {"a": 1, "b": 2}})), "2");
        assert_eq!(render("{{length \"[1,2,3]\"}}", &json!({})), "3");
        assert_eq!(render("{{length missing}}", &json!({})), "0");
    }

    #[test]
    fn test_equals_length() {
        let tpl = "{{#equalsLength array 5}}yes{{else}}no{{/equalsLength}}";
        assert_eq!(render(tpl, &letters()), "yes");
        let tpl = "{{#lengthEqual array 2}}yes{{else}}no{{/lengthEqual}}";
        assert_eq!(render(tpl, &letters()), "no");
    }

    // ── Membership ──────────────────────────────────────────────────

    #[test]
    fn test_in_array() {
        let tpl = "{{#inArray array \"d\"}}yes{{else}}no{{/inArray}}";
        assert_eq!(render(tpl, &letters()), "yes");
        let tpl = "{{#inArray array \"z\"}}yes{{else}}no{{/inArray}}";
        assert_eq!(render(tpl, &letters()), "no");
    }

    #[test]
    fn test_is_array() {
        assert_eq!(render("{{isArray array}}", &letters()), "true");
        assert_eq!(render("{{isArray \"nope\"}}", &json!({})), "false");
    }

    // ── Iteration ───────────────────────────────────────────────────

    #[test]
    fn test_each_index() {
        assert_eq!(
            render("{{#eachIndex array}}{{item}}:{{index}} {{/eachIndex}}", &json!({"array": ["a", "b"]})),
            "a:0 b:1 "
        );
    }

    #[test]
    fn test_for_each() {
        let data = json!({"goodies": [{"name": "p"}, {"name": "q"}]});
        assert_eq!(
            render(
                "{{#forEach goodies}}{{name}}{{index}}/{{total}}{{#if isLast}}.{{else}},{{/if}}{{/forEach}}",
                &data
            ),
            "p1/2,q2/2."
        );
        assert_eq!(
            render("{{#forEach empty}}x{{else}}none{{/forEach}}", &json!({"empty": []})),
            "none"
        );
    }

    #[test]
    fn test_filter() {
        let tpl = "{{#filter array \"b\"}}<{{this}}>{{else}}none{{/filter}}";
        assert_eq!(render(tpl, &letters()), "<b>");
        assert_eq!(render(tpl, &json!({"array": ["x"]})), "none");

        let data = json!({"posts": [{"tag": "a"}, {"tag": "b"}, {"tag": "a"}]});
        let tpl = "{{#filter posts \"a\" property=\"tag\"}}<{{tag}}>{{/filter}}";
        assert_eq!(render(tpl, &data), "<a><a>");
    }

    #[test]
    fn test_with_slices() {
        assert_eq!(render("{{#withAfter array 3}}<{{this}}>{{/withAfter}}", &letters()), "<d><e>");
        assert_eq!(render("{{#withBefore array 3}}<{{this}}>{{/withBefore}}", &letters()), "<a><b>");
        assert_eq!(render("{{#withFirst array 2}}<{{this}}>{{/withFirst}}", &letters()), "<a><b>");
        assert_eq!(render("{{#withFirst array}}<{{this}}>{{/withFirst}}", &letters()), "<a>");
        assert_eq!(render("{{#withLast array 2}}<{{this}}>{{/withLast}}", &letters()), "<d><e>");
    }

    #[test]
    fn test_with_sort() {
        let data = json!({"posts": [{"n": "c"}, {"n": "a"}, {"n": "b"}]});
        assert_eq!(render("{{#withSort posts \"n\"}}{{n}}{{/withSort}}", &data), "abc");
        assert_eq!(
            render("{{#withSort posts \"n\" reverse=true}}{{n}}{{/withSort}}", &data),
            "cba"
        );
    }

    #[test]
    fn test_index_local_var_in_blocks() {
        assert_eq!(
            render("{{#withFirst array 2}}{{@index}}{{this}}{{/withFirst}}", &letters()),
            "0a1b"
        );
    }
}
