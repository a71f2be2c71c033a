//! String helpers: casing, trimming, truncation, search and replace.
//!
//! Helpers that expect a string pass non-string input through unchanged (or
//! render nothing when there is no usable input) rather than failing the
//! render, matching how templates are typically authored: front-matter data
//! is often optional.

use std::sync::OnceLock;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use regex::{Captures, Regex};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::{capture_block, param};
use hbs_helpers_core::text::{change_case, chop};
use hbs_helpers_core::value::render_string;
use hbs_helpers_core::{Conditional, HelperError, Inline, TestHelper, ValueHelper};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad \
minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea \
commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit \
esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat \
non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

fn str_arg<'a>(h: &'a Helper<'_, '_>, index: usize) -> Option<&'a str> {
    param(h, index).and_then(Json::as_str)
}

fn usize_arg(h: &Helper<'_, '_>, index: usize) -> Option<usize> {
    param(h, index)
        .and_then(hbs_helpers_core::value::as_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize)
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `{{append str suffix}}` - appends `suffix` to `str`.
pub struct Append;

impl ValueHelper for Append {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), str_arg(h, 1)) {
            (Some(s), Some(suffix)) => Ok(json!(format!("{s}{suffix}"))),
            (Some(s), None) => Ok(json!(s)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{prepend str prefix}}` - prepends `prefix` to `str`.
pub struct Prepend;

impl ValueHelper for Prepend {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), str_arg(h, 1)) {
            (Some(s), Some(prefix)) => Ok(json!(format!("{prefix}{s}"))),
            (Some(s), None) => Ok(json!(s)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{camelcase str}}` - `"foo bar baz"` becomes `"fooBarBaz"`.
pub struct Camelcase;

impl ValueHelper for Camelcase {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(change_case(s, |ch| ch.to_uppercase()))),
            None => Ok(json!("")),
        }
    }
}

/// `{{pascalcase str}}` - `"foo bar baz"` becomes `"FooBarBaz"`.
pub struct Pascalcase;

impl ValueHelper for Pascalcase {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(capitalize_word(&change_case(s, |ch| ch.to_uppercase())))),
            None => Ok(json!("")),
        }
    }
}

/// `{{dashcase str}}` - `"a b.c"` becomes `"a-b-c"`.
pub struct Dashcase;

impl ValueHelper for Dashcase {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(change_case(s, |ch| format!("-{ch}")))),
            None => Ok(json!("")),
        }
    }
}

/// `{{dotcase str}}` - `"a b c"` becomes `"a.b.c"`.
pub struct Dotcase;

impl ValueHelper for Dotcase {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(change_case(s, |ch| format!(".{ch}")))),
            None => Ok(json!("")),
        }
    }
}

/// `{{pathcase str}}` - `"a b c"` becomes `"a/b/c"`.
pub struct Pathcase;

impl ValueHelper for Pathcase {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(change_case(s, |ch| format!("/{ch}")))),
            None => Ok(json!("")),
        }
    }
}

/// `{{snakecase str}}` - `"a b c"` becomes `"a_b_c"`.
pub struct Snakecase;

impl ValueHelper for Snakecase {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(change_case(s, |ch| format!("_{ch}")))),
            None => Ok(json!("")),
        }
    }
}

/// `{{capitalize str}}` - uppercases the first character.
pub struct Capitalize;

impl ValueHelper for Capitalize {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(capitalize_word(s))),
            None => Ok(json!("")),
        }
    }
}

/// `{{capitalizeAll str}}` - uppercases the first character of every word.
pub struct CapitalizeAll;

impl ValueHelper for CapitalizeAll {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        static WORD: OnceLock<Regex> = OnceLock::new();
        let word = WORD.get_or_init(|| Regex::new(r"\w\S*").unwrap());
        match str_arg(h, 0) {
            Some(s) => {
                let out = word.replace_all(s, |caps: &Captures<'_>| capitalize_word(&caps[0]));
                Ok(json!(out.into_owned()))
            }
            None => Ok(json!("")),
        }
    }
}

/// `{{center str spaces}}` - pads both sides with `spaces` non-breaking
/// spaces.
pub struct Center;

impl ValueHelper for Center {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => {
                let pad = "&nbsp;".repeat(usize_arg(h, 1).unwrap_or(0));
                Ok(json!(format!("{pad}{s}{pad}")))
            }
            None => Ok(Json::Null),
        }
    }
}

/// `{{chop str}}` - trims non-word characters from both ends.
pub struct Chop;

impl ValueHelper for Chop {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(chop(s))),
            None => Ok(json!("")),
        }
    }
}

/// `{{ellipsis str limit}}` - truncates to `limit` characters and appends an
/// ellipsis when anything was cut off.
pub struct Ellipsis;

impl ValueHelper for Ellipsis {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), usize_arg(h, 1)) {
            (Some(s), Some(limit)) => {
                if s.chars().count() <= limit {
                    Ok(json!(s))
                } else {
                    let cut: String = s.chars().take(limit).collect();
                    Ok(json!(format!("{cut}…")))
                }
            }
            (Some(s), None) => Ok(json!(s)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{hyphenate str}}` - replaces spaces with hyphens.
pub struct Hyphenate;

impl ValueHelper for Hyphenate {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(s.split(' ').collect::<Vec<_>>().join("-"))),
            None => Ok(json!("")),
        }
    }
}

/// `{{#isString value}}...{{/isString}}`
pub struct IsString;

impl TestHelper for IsString {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        Ok(matches!(param(h, 0), Some(Json::String(_))))
    }
}

/// `{{lowercase str}}`, also usable as a block: `{{#lowercase}}...{{/lowercase}}`.
pub struct Lowercase;

impl HelperDef for Lowercase {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let text = if h.is_block() {
            capture_block(h, r, ctx, rc)?
        } else {
            param(h, 0).map(render_string).unwrap_or_default()
        };
        out.write(&text.to_lowercase())?;
        Ok(())
    }
}

/// `{{uppercase str}}`, also usable as a block: `{{#uppercase}}...{{/uppercase}}`.
pub struct Uppercase;

impl HelperDef for Uppercase {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let text = if h.is_block() {
            capture_block(h, r, ctx, rc)?
        } else {
            param(h, 0).map(render_string).unwrap_or_default()
        };
        out.write(&text.to_uppercase())?;
        Ok(())
    }
}

/// `{{occurrences str substring}}` - counts non-overlapping occurrences.
pub struct Occurrences;

impl ValueHelper for Occurrences {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), str_arg(h, 1)) {
            (Some(s), Some(sub)) if !sub.is_empty() => Ok(json!(s.matches(sub).count())),
            (Some(_), Some(_)) => Ok(json!(0)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{plusify str}}` - replaces spaces (or the given character) with `+`.
pub struct Plusify;

impl ValueHelper for Plusify {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => {
                let sep = str_arg(h, 1).unwrap_or(" ");
                Ok(json!(s.split(sep).collect::<Vec<_>>().join("+")))
            }
            None => Ok(json!("")),
        }
    }
}

/// `{{remove str substring}}` - removes every occurrence of `substring`.
pub struct Remove;

impl ValueHelper for Remove {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), str_arg(h, 1)) {
            (Some(s), Some(sub)) if !sub.is_empty() => Ok(json!(s.replace(sub, ""))),
            (Some(s), _) => Ok(json!(s)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{removeFirst str substring}}` - removes the first occurrence only.
pub struct RemoveFirst;

impl ValueHelper for RemoveFirst {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), str_arg(h, 1)) {
            (Some(s), Some(sub)) if !sub.is_empty() => Ok(json!(s.replacen(sub, "", 1))),
            (Some(s), _) => Ok(json!(s)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{replace str a b}}` - replaces every occurrence of `a` with `b`.
pub struct Replace;

impl ValueHelper for Replace {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => match (str_arg(h, 1), str_arg(h, 2)) {
                (Some(a), Some(b)) if !a.is_empty() => Ok(json!(s.replace(a, b))),
                _ => Ok(json!(s)),
            },
            None => Ok(Json::Null),
        }
    }
}

/// `{{replaceFirst str a b}}` - replaces the first occurrence of `a` with `b`.
pub struct ReplaceFirst;

impl ValueHelper for ReplaceFirst {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => match (str_arg(h, 1), str_arg(h, 2)) {
                (Some(a), Some(b)) if !a.is_empty() => Ok(json!(s.replacen(a, b, 1))),
                _ => Ok(json!(s)),
            },
            None => Ok(Json::Null),
        }
    }
}

/// `{{sentence str}}` - capitalizes the first letter of every sentence and
/// lowercases the rest.
pub struct Sentence;

impl ValueHelper for Sentence {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        static SENTENCE: OnceLock<Regex> = OnceLock::new();
        let sentence = SENTENCE.get_or_init(|| Regex::new(r"\S[^.?!]*[.?!]*").unwrap());
        match str_arg(h, 0) {
            Some(s) => {
                let out = sentence.replace_all(s, |caps: &Captures<'_>| {
                    capitalize_word(&caps[0].to_lowercase())
                });
                Ok(json!(out.into_owned()))
            }
            None => Ok(json!("")),
        }
    }
}

/// `{{split str sep}}` - splits into an array, on `,` by default.
pub struct Split;

impl ValueHelper for Split {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => {
                let sep = str_arg(h, 1).unwrap_or(",");
                Ok(json!(s.split(sep).collect::<Vec<_>>()))
            }
            None => Ok(json!([])),
        }
    }
}

/// `{{#startsWith prefix str}}...{{else}}...{{/startsWith}}`
pub struct StartsWith;

impl TestHelper for StartsWith {
    fn test(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<bool, HelperError> {
        match (str_arg(h, 0), str_arg(h, 1)) {
            (Some(prefix), Some(s)) => Ok(s.starts_with(prefix)),
            _ => Ok(false),
        }
    }
}

/// `{{titleize str}}` - `"this is-title case"` becomes `"This Is Title Case"`.
pub struct Titleize;

impl ValueHelper for Titleize {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        static SEPARATORS: OnceLock<Regex> = OnceLock::new();
        let separators = SEPARATORS.get_or_init(|| Regex::new(r"[-_ ]+").unwrap());
        match str_arg(h, 0) {
            Some(s) => {
                let spaced = separators.replace_all(s, " ");
                let titled = spaced
                    .split(' ')
                    .map(capitalize_word)
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(json!(titled))
            }
            None => Ok(json!("")),
        }
    }
}

/// `{{trim str}}`
pub struct Trim;

impl ValueHelper for Trim {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(s.trim())),
            None => Ok(json!("")),
        }
    }
}

/// `{{trimLeft str}}`
pub struct TrimLeft;

impl ValueHelper for TrimLeft {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(s.trim_start())),
            None => Ok(json!("")),
        }
    }
}

/// `{{trimRight str}}`
pub struct TrimRight;

impl ValueHelper for TrimRight {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match str_arg(h, 0) {
            Some(s) => Ok(json!(s.trim_end())),
            None => Ok(json!("")),
        }
    }
}

/// `{{truncate str limit suffix}}` - truncates to `limit` characters
/// including the optional suffix.
pub struct Truncate;

impl ValueHelper for Truncate {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), usize_arg(h, 1)) {
            (Some(s), Some(limit)) => {
                if s.chars().count() <= limit {
                    return Ok(json!(s));
                }
                let suffix = str_arg(h, 2).unwrap_or("");
                let keep = limit.saturating_sub(suffix.chars().count());
                let cut: String = s.chars().take(keep).collect();
                Ok(json!(format!("{cut}{suffix}")))
            }
            (Some(s), None) => Ok(json!(s)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{truncateWords str count suffix}}` - keeps the first `count` words.
pub struct TruncateWords;

impl ValueHelper for TruncateWords {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (str_arg(h, 0), usize_arg(h, 1)) {
            (Some(s), Some(count)) => {
                let suffix = str_arg(h, 2).unwrap_or("…");
                let words: Vec<&str> = s.split([' ', '\t']).collect();
                let kept = if count < words.len() { &words[..count] } else { &words[..] };
                Ok(json!(format!("{}{suffix}", kept.join(" ").trim())))
            }
            (Some(s), None) => Ok(json!(s)),
            _ => Ok(Json::Null),
        }
    }
}

/// `{{lorem num}}` - `num` characters of placeholder text.
pub struct Lorem;

impl ValueHelper for Lorem {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let num = usize_arg(h, 0).filter(|n| *n >= 1).unwrap_or(11);
        let mut text = String::with_capacity(num);
        while text.len() < num {
            text.push_str(LOREM);
        }
        text.truncate(num);
        Ok(json!(text))
    }
}

/// Registers the string helpers. `downcase` and `upcase` are aliases for
/// `lowercase` and `uppercase`.
pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("append", Box::new(Inline(Append)));
    hb.register_helper("camelcase", Box::new(Inline(Camelcase)));
    hb.register_helper("capitalize", Box::new(Inline(Capitalize)));
    hb.register_helper("capitalizeAll", Box::new(Inline(CapitalizeAll)));
    hb.register_helper("center", Box::new(Inline(Center)));
    hb.register_helper("chop", Box::new(Inline(Chop)));
    hb.register_helper("dashcase", Box::new(Inline(Dashcase)));
    hb.register_helper("dotcase", Box::new(Inline(Dotcase)));
    hb.register_helper("downcase", Box::new(Lowercase));
    hb.register_helper("ellipsis", Box::new(Inline(Ellipsis)));
    hb.register_helper("hyphenate", Box::new(Inline(Hyphenate)));
    hb.register_helper("isString", Box::new(Conditional(IsString)));
    hb.register_helper("lorem", Box::new(Inline(Lorem)));
    hb.register_helper("lowercase", Box::new(Lowercase));
    hb.register_helper("occurrences", Box::new(Inline(Occurrences)));
    hb.register_helper("pascalcase", Box::new(Inline(Pascalcase)));
    hb.register_helper("pathcase", Box::new(Inline(Pathcase)));
    hb.register_helper("plusify", Box::new(Inline(Plusify)));
    hb.register_helper("prepend", Box::new(Inline(Prepend)));
    hb.register_helper("remove", Box::new(Inline(Remove)));
    hb.register_helper("removeFirst", Box::new(Inline(RemoveFirst)));
    hb.register_helper("replace", Box::new(Inline(Replace)));
    hb.register_helper("replaceFirst", Box::new(Inline(ReplaceFirst)));
    hb.register_helper("sentence", Box::new(Inline(Sentence)));
    hb.register_helper("snakecase", Box::new(Inline(Snakecase)));
    hb.register_helper("split", Box::new(Inline(Split)));
    hb.register_helper("startsWith", Box::new(Conditional(StartsWith)));
    hb.register_helper("titleize", Box::new(Inline(Titleize)));
    hb.register_helper("trim", Box::new(Inline(Trim)));
    hb.register_helper("trimLeft", Box::new(Inline(TrimLeft)));
    hb.register_helper("trimRight", Box::new(Inline(TrimRight)));
    hb.register_helper("truncate", Box::new(Inline(Truncate)));
    hb.register_helper("truncateWords", Box::new(Inline(TruncateWords)));
    hb.register_helper("upcase", Box::new(Uppercase));
    hb.register_helper("uppercase", Box::new(Uppercase));
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

    // ── Casing ──────────────────────────────────────────────────────

    #[test]
    fn test_camelcase() {
        assert_eq!(render("{{camelcase \"foo bar baz\"}}", &json!({})), "fooBarBaz");
        assert_eq!(render("{{camelcase \"foo_bar-baz\"}}", &json!({})), "fooBarBaz");
        assert_eq!(render("{{camelcase}}", &json!({})), "");
    }

    #[test]
    fn test_pascalcase() {
        assert_eq!(render("{{pascalcase \"foo bar baz\"}}", &json!({})), "FooBarBaz");
    }

    #[test]
    fn test_dash_dot_path_snake() {
        assert_eq!(render("{{dashcase \"a b.c\"}}", &json!({})), "a-b-c");
        assert_eq!(render("{{dotcase \"a b c\"}}", &json!({})), "a.b.c");
        assert_eq!(render("{{pathcase \"a b c\"}}", &json!({})), "a/b/c");
        assert_eq!(render("{{snakecase \"a b c\"}}", &json!({})), "a_b_c");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(render("{{capitalize \"foo bar\"}}", &json!({})), "Foo bar");
        assert_eq!(render("{{capitalizeAll \"foo bar baz\"}}", &json!({})), "Foo Bar Baz");
    }

    #[test]
    fn test_titleize() {
        assert_eq!(
            render("{{titleize \"this is-title_case\"}}", &json!({})),
            "This Is Title Case"
        );
    }

    #[test]
    fn test_sentence() {
        assert_eq!(
            render("{{sentence \"hello world. GOODBYE world.\"}}", &json!({})),
            "Hello world. Goodbye world."
        );
    }

    #[test]
    fn test_lowercase_uppercase_inline_and_block() {
        assert_eq!(render("{{lowercase \"ABC\"}}", &json!({})), "abc");
        assert_eq!(render("{{uppercase \"abc\"}}", &json!({})), "ABC");
        assert_eq!(render("{{#uppercase}}a{{x}}c{{/uppercase}}", &json!({"x": "b"})), "ABC");
        assert_eq!(render("{{downcase \"ABC\"}}", &json!({})), "abc");
        assert_eq!(render("{{upcase \"abc\"}}", &json!({})), "ABC");
    }

    // ── Trimming and chopping ───────────────────────────────────────

    #[test]
    fn test_trim_family() {
        assert_eq!(render("{{trim \"  ab  \"}}", &json!({})), "ab");
        assert_eq!(render("{{trimLeft \"  ab  \"}}", &json!({})), "ab  ");
        assert_eq!(render("{{trimRight \"  ab  \"}}", &json!({})), "  ab");
    }

    #[test]
    fn test_chop() {
        assert_eq!(render("{{chop \"__foo__\"}}", &json!({})), "foo");
    }

    // ── Truncation ──────────────────────────────────────────────────

    #[test]
    fn test_truncate() {
        assert_eq!(render("{{truncate \"foo bar baz\" 7}}", &json!({})), "foo bar");
        assert_eq!(render("{{truncate \"foo bar baz\" 7 \"...\"}}", &json!({})), "foo ...");
        assert_eq!(render("{{truncate \"short\" 100}}", &json!({})), "short");
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(
            render("{{truncateWords \"foo bar baz qux\" 2}}", &json!({})),
            "foo bar…"
        );
        assert_eq!(
            render("{{truncateWords \"foo bar\" 5 \"!\"}}", &json!({})),
            "foo bar!"
        );
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(render("{{ellipsis \"foo bar baz\" 7}}", &json!({})), "foo bar…");
        assert_eq!(render("{{ellipsis \"short\" 10}}", &json!({})), "short");
    }

    // ── Search and replace ──────────────────────────────────────────

    #[test]
    fn test_replace_and_remove() {
        assert_eq!(render("{{replace \"a b a\" \"a\" \"z\"}}", &json!({})), "z b z");
        assert_eq!(render("{{replaceFirst \"a b a\" \"a\" \"z\"}}", &json!({})), "z b a");
        assert_eq!(render("{{remove \"a b a\" \"a \"}}", &json!({})), "b a");
        assert_eq!(render("{{removeFirst \"a b a\" \"a \"}}", &json!({})), "b a");
    }

    #[test]
    fn test_occurrences() {
        assert_eq!(render("{{occurrences \"jjjj\" \"jj\"}}", &json!({})), "2");
        assert_eq!(render("{{occurrences \"abc\" \"z\"}}", &json!({})), "0");
    }

    // ── Assembly ────────────────────────────────────────────────────

    #[test]
    fn test_append_prepend() {
        assert_eq!(render("{{append name \".md\"}}", &json!({"name": "doc"})), "doc.md");
        assert_eq!(render("{{prepend name \"docs/\"}}", &json!({"name": "a"})), "docs/a");
    }

    #[test]
    fn test_center() {
        assert_eq!(render("{{center \"ab\" 2}}", &json!({})), "&nbsp;&nbsp;ab&nbsp;&nbsp;");
    }

    #[test]
    fn test_hyphenate_plusify() {
        assert_eq!(render("{{hyphenate \"a b c\"}}", &json!({})), "a-b-c");
        assert_eq!(render("{{plusify \"a b c\"}}", &json!({})), "a+b+c");
        assert_eq!(render("{{plusify \"a-b\" \"-\"}}", &json!({})), "a+b");
    }

    #[test]
    fn test_split() {
        assert_eq!(render("{{#each (split \"a,b,c\")}}<{{this}}>{{/each}}", &json!({})), "<a><b><c>");
        assert_eq!(render("{{#each (split \"a b\" \" \")}}<{{this}}>{{/each}}", &json!({})), "<a><b>");
    }

    // ── Predicates ──────────────────────────────────────────────────

    #[test]
    fn test_starts_with() {
        let tpl = "{{#startsWith \"Goodbye\" msg}}yes{{else}}no{{/startsWith}}";
        assert_eq!(render(tpl, &json!({"msg": "Goodbye world"})), "yes");
        assert_eq!(render(tpl, &json!({"msg": "Hello world"})), "no");
    }

    #[test]
    fn test_is_string() {
        assert_eq!(render("{{isString \"a\"}}", &json!({})), "true");
        assert_eq!(render("{{isString 5}}", &json!({})), "false");
    }

    #[test]
    fn test_lorem() {
        assert_eq!(render("{{lorem 5}}", &json!({})), "Lorem");
        assert_eq!(render("{{lorem}}", &json!({})), "Lorem ipsum");
    }
}
