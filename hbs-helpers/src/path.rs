//! File path helpers.
//!
//! Paths are treated as `/`-separated strings and dissected lexically; no
//! filesystem access happens here.

use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};

use hbs_helpers_core::convention::{hash, param};
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

fn path_arg<'a>(h: &'a Helper<'_, '_>, index: usize) -> Option<&'a str> {
    param(h, index).and_then(Json::as_str)
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(i) if i > 0 => &name[i..],
        _ => "",
    }
}

/// Resolves `.` and `..` segments lexically.
fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|p| *p != "..") {
                    stack.pop();
                } else if !absolute {
                    stack.push("..");
                }
            }
            other => stack.push(other),
        }
    }
    let joined = stack.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

fn relative_to(from_dir: &str, to: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|c| !c.is_empty() && *c != ".").collect();
    let target: Vec<&str> = to.split('/').filter(|c| !c.is_empty() && *c != ".").collect();
    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend(&target[common..]);
    parts.join("/")
}

/// `{{absolute filepath}}` - resolves against the `cwd` hash argument, a
/// `cwd` field of the context, or the process working directory.
pub struct Absolute;

impl ValueHelper for Absolute {
    fn value(&self, h: &Helper<'_, '_>, ctx: &Context) -> Result<Json, HelperError> {
        let Some(filepath) = path_arg(h, 0) else {
            return Ok(json!(""));
        };
        if filepath.starts_with('/') {
            return Ok(json!(normalize(filepath)));
        }
        let cwd = hash(h, "cwd")
            .and_then(Json::as_str)
            .map(String::from)
            .or_else(|| {
                ctx.data()
                    .get("cwd")
                    .and_then(Json::as_str)
                    .map(String::from)
            })
            .or_else(|| {
                std::env::current_dir()
                    .ok()
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| ".".to_string());
        Ok(json!(normalize(&format!("{cwd}/{filepath}"))))
    }
}

/// `{{basename filepath}}` - the file name, extension included.
pub struct Basename;

impl ValueHelper for Basename {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(json!(path_arg(h, 0).map(file_name).unwrap_or("")))
    }
}

/// `{{dirname filepath}}` - everything before the file name; `.` when there
/// is no directory part.
pub struct Dirname;

impl ValueHelper for Dirname {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let dir = path_arg(h, 0).map_or("", |p| match p.rfind('/') {
            Some(0) => "/",
            Some(i) => &p[..i],
            None => ".",
        });
        Ok(json!(dir))
    }
}

/// `{{extname filepath}}` - the extension, dot included.
pub struct Extname;

impl ValueHelper for Extname {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        Ok(json!(path_arg(h, 0).map(extension).unwrap_or("")))
    }
}

/// `{{relative a b}}` - the path to `b` from the directory containing `a`.
pub struct Relative;

impl ValueHelper for Relative {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        match (path_arg(h, 0), path_arg(h, 1)) {
            (Some(a), Some(b)) => {
                let from_dir = match a.rfind('/') {
                    Some(i) => &a[..i],
                    None => "",
                };
                Ok(json!(relative_to(from_dir, b)))
            }
            _ => Ok(json!("")),
        }
    }
}

/// `{{segments filepath a b}}` - joins path segments `a..b`.
pub struct Segments;

impl ValueHelper for Segments {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let Some(filepath) = path_arg(h, 0) else {
            return Ok(json!(""));
        };
        let parts: Vec<&str> = filepath.split('/').collect();
        let a = param(h, 1)
            .and_then(hbs_helpers_core::value::as_f64)
            .map_or(0, |n| n as usize)
            .min(parts.len());
        let b = param(h, 2)
            .and_then(hbs_helpers_core::value::as_f64)
            .map_or(parts.len(), |n| n as usize)
            .clamp(a, parts.len());
        Ok(json!(parts[a..b].join("/")))
    }
}

/// `{{stem filepath}}` - the file name without its extension.
pub struct Stem;

impl ValueHelper for Stem {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let stem = path_arg(h, 0).map_or("", |p| {
            let name = file_name(p);
            name.strip_suffix(extension(p)).unwrap_or(name)
        });
        Ok(json!(stem))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("absolute", Box::new(Inline(Absolute)));
    hb.register_helper("basename", Box::new(Inline(Basename)));
    hb.register_helper("dirname", Box::new(Inline(Dirname)));
    hb.register_helper("extname", Box::new(Inline(Extname)));
    hb.register_helper("relative", Box::new(Inline(Relative)));
    hb.register_helper("segments", Box::new(Inline(Segments)));
    hb.register_helper("stem", Box::new(Inline(Stem)));
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

    #[test]
    fn test_basename_stem_extname() {
        assert_eq!(render("{{basename \"docs/toc.md\"}}", &json!({})), "toc.md");
        assert_eq!(render("{{stem \"docs/toc.md\"}}", &json!({})), "toc");
        assert_eq!(render("{{extname \"docs/toc.md\"}}", &json!({})), ".md");
        assert_eq!(render("{{extname \"docs/README\"}}", &json!({})), "");
        assert_eq!(render("{{stem \".gitignore\"}}", &json!({})), ".gitignore");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(render("{{dirname \"docs/toc.md\"}}", &json!({})), "docs");
        assert_eq!(render("{{dirname \"a/b/c.md\"}}", &json!({})), "a/b");
        assert_eq!(render("{{dirname \"toc.md\"}}", &json!({})), ".");
        assert_eq!(render("{{dirname \"/toc.md\"}}", &json!({})), "/");
    }

    #[test]
    fn test_relative() {
        assert_eq!(
            render("{{relative \"dist/docs.html\" \"index.html\"}}", &json!({})),
            "../index.html"
        );
        assert_eq!(
            render("{{relative \"dist/pages/home.html\" \"dist/css/main.css\"}}", &json!({})),
            "../css/main.css"
        );
    }

    #[test]
    fn test_segments() {
        assert_eq!(render("{{segments \"a/b/c/e.js\" 1 3}}", &json!({})), "b/c");
        assert_eq!(render("{{segments \"a/b/c/e.js\" 1 2}}", &json!({})), "b");
    }

    #[test]
    fn test_absolute() {
        assert_eq!(
            render("{{absolute \"docs/toc.md\" cwd=\"/srv/app\"}}", &json!({})),
            "/srv/app/docs/toc.md"
        );
        assert_eq!(
            render("{{absolute \"../toc.md\" cwd=\"/srv/app\"}}", &json!({})),
            "/srv/toc.md"
        );
        assert_eq!(render("{{absolute \"/etc/a.conf\"}}", &json!({})), "/etc/a.conf");
        assert_eq!(
            render("{{absolute \"x.md\"}}", &json!({"cwd": "/data"})),
            "/data/x.md"
        );
    }
}
