//! Filesystem helpers.

use std::fs;

use glob::Pattern;
use handlebars::{Context, Handlebars, Helper};
use serde_json::{json, Value as Json};
use tracing::debug;

use hbs_helpers_core::convention::param;
use hbs_helpers_core::{HelperError, Inline, ValueHelper};

/// `{{read filepath}}` - the file's contents as a string.
pub struct Read;

impl ValueHelper for Read {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let path = param(h, 0)
            .and_then(Json::as_str)
            .ok_or(HelperError::MissingArgument {
                helper: "read",
                argument: "filepath",
            })?;
        let contents = fs::read_to_string(path).map_err(|source| HelperError::Io {
            helper: "read",
            path: path.to_string(),
            source,
        })?;
        Ok(json!(contents))
    }
}

/// `{{readdir dir}}` - directory entries as full paths, sorted. An optional
/// second argument filters the entries: the strings `"isFile"` and
/// `"isDirectory"` keep only files or directories, anything else is a glob
/// matched against each entry's file name.
pub struct Readdir;

enum ReaddirFilter {
    Files,
    Directories,
    Glob(Pattern),
}

impl ReaddirFilter {
    fn parse(raw: &str) -> Result<Self, HelperError> {
        match raw {
            "isFile" => Ok(Self::Files),
            "isDirectory" => Ok(Self::Directories),
            pattern => Pattern::new(pattern).map(Self::Glob).map_err(|e| {
                HelperError::Parse {
                    helper: "readdir",
                    message: format!("bad glob `{pattern}`: {e}"),
                }
            }),
        }
    }

    fn keeps(&self, entry: &fs::DirEntry) -> bool {
        match self {
            Self::Files => entry.file_type().map_or(false, |t| t.is_file()),
            Self::Directories => entry.file_type().map_or(false, |t| t.is_dir()),
            Self::Glob(g) => g.matches(&entry.file_name().to_string_lossy()),
        }
    }
}

impl ValueHelper for Readdir {
    fn value(&self, h: &Helper<'_, '_>, _ctx: &Context) -> Result<Json, HelperError> {
        let dir = param(h, 0)
            .and_then(Json::as_str)
            .ok_or(HelperError::MissingArgument {
                helper: "readdir",
                argument: "directory",
            })?;
        let filter = match param(h, 1).and_then(Json::as_str) {
            Some(raw) => Some(ReaddirFilter::parse(raw)?),
            None => None,
        };
        let entries = fs::read_dir(dir).map_err(|source| HelperError::Io {
            helper: "readdir",
            path: dir.to_string(),
            source,
        })?;
        let mut paths: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| filter.as_ref().map_or(true, |f| f.keeps(entry)))
            .map(|entry| entry.path().to_string_lossy().into_owned())
            .collect();
        paths.sort();
        debug!(dir, entries = paths.len(), "readdir");
        Ok(json!(paths))
    }
}

pub fn register(hb: &mut Handlebars<'_>) {
    hb.register_helper("read", Box::new(Inline(Read)));
    hb.register_helper("readdir", Box::new(Inline(Readdir)));
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write as _;

    use super::*;
    use serde_json::json;

    fn render(tpl: &str, data: &Json) -> String {
        let mut hb = Handlebars::new();
        register(&mut hb);
        hb.render_template(tpl, data).unwrap()
    }

    #[test]
    fn test_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "hello from disk").unwrap();

        let data = json!({"file": path.to_str().unwrap()});
        assert_eq!(render("{{read file}}", &data), "hello from disk");
    }

    #[test]
    fn test_read_missing_file_fails_render() {
        let mut hb = Handlebars::new();
        register(&mut hb);
        let err = hb
            .render_template("{{read \"/no/such/file.txt\"}}", &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("failed to access"));
    }

    #[test]
    fn test_readdir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();

        let data = json!({"dir": dir.path().to_str().unwrap()});
        let out = render("{{readdir dir}}", &data);
        assert!(out.contains("a.md"));
        assert!(out.contains("b.txt"));

        let filtered = render("{{readdir dir \"*.md\"}}", &data);
        assert!(filtered.contains("a.md"));
        assert!(!filtered.contains("b.txt"));
    }

    #[test]
    fn test_readdir_kind_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let data = json!({"dir": dir.path().to_str().unwrap()});

        let files = render("{{readdir dir \"isFile\"}}", &data);
        assert!(files.contains("notes.md"));
        assert!(!files.contains("sub"));

        let dirs = render("{{readdir dir \"isDirectory\"}}", &data);
        assert!(dirs.contains("sub"));
        assert!(!dirs.contains("notes.md"));
    }
}
