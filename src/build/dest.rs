//! Destination path naming.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Readable output extension.
pub const CSS_EXT: &str = ".css";
/// Minified output extension.
pub const MIN_CSS_EXT: &str = ".min.css";

/// Make sure `path` ends with `add`, first stripping `replace` if it is a
/// trailing suffix.
///
/// `replace` is only ever removed from the end of the name, and never when the
/// name already ends with a longer `add` (so `.min.css` survives a `.css`
/// replace). The operation is idempotent and works on the raw OS string, so
/// non-UTF-8 names are kept intact.
pub fn ensure_extension(path: &Path, add: &str, replace: Option<&str>) -> PathBuf {
    let mut base = path.to_path_buf();
    if let Some(replace) = replace {
        let already_added = add.len() > replace.len() && ends_with(&base, add);
        if !already_added && ends_with(&base, replace) {
            base = strip_extensions(&base, replace.matches('.').count());
        }
    }
    if ends_with(&base, add) {
        return base;
    }
    let mut name = base.into_os_string();
    name.push(add);
    PathBuf::from(name)
}

fn ends_with(path: &Path, suffix: &str) -> bool {
    path.as_os_str().as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// Drop the last `count` extensions of `path`.
fn strip_extensions(path: &Path, count: usize) -> PathBuf {
    let mut stripped = path.to_path_buf();
    for _ in 0..count {
        stripped.set_extension("");
    }
    stripped
}

/// Destination of the readable variant: `.css` ensured, `.min.css` replaced.
pub fn clean_dest(dest: &Path) -> PathBuf {
    ensure_extension(dest, CSS_EXT, Some(MIN_CSS_EXT))
}

/// Destination of the minified variant: `.min.css` ensured, `.css` replaced.
pub fn minified_dest(dest: &Path) -> PathBuf {
    ensure_extension(dest, MIN_CSS_EXT, Some(CSS_EXT))
}

/// Place `path` inside `base`, keeping its directory structure.
///
/// Root and prefix components of `path` are dropped and `..` is resolved
/// lexically without climbing out of `base`, so an absolute source lands
/// under `base` instead of replacing it.
pub fn nest_under(base: &Path, path: &Path) -> PathBuf {
    let mut parts: Vec<OsString> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_os_string()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
    let mut nested = base.to_path_buf();
    nested.extend(parts);
    nested
}

/// Temporary output of a preprocessed source: the source nested under
/// `temp_dir` with `.css` appended.
pub fn preprocessed_dest(temp_dir: &Path, source: &Path) -> PathBuf {
    let mut name = nest_under(temp_dir, source).into_os_string();
    name.push(CSS_EXT);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_extension_appends() {
        assert_eq!(ensure_extension(Path::new("dist/app"), ".css", None), PathBuf::from("dist/app.css"));
    }

    #[test]
    fn test_ensure_extension_is_idempotent() {
        let once = ensure_extension(Path::new("dist/app"), ".css", None);
        let twice = ensure_extension(&once, ".css", None);
        assert_eq!(once, twice);

        let min_once = minified_dest(Path::new("dist/app"));
        assert_eq!(minified_dest(&min_once), min_once);
        assert_eq!(clean_dest(&clean_dest(Path::new("x.min.css"))), PathBuf::from("x.css"));
    }

    #[test]
    fn test_ensure_extension_replaces_suffix() {
        assert_eq!(
            ensure_extension(Path::new("a.min.css"), ".css", Some(".min.css")),
            PathBuf::from("a.css")
        );
    }

    #[test]
    fn test_replace_only_strips_trailing_suffix() {
        assert_eq!(clean_dest(Path::new("a.min.css.bak")), PathBuf::from("a.min.css.bak.css"));
        assert_eq!(clean_dest(Path::new("dist.min.css/app")), PathBuf::from("dist.min.css/app.css"));
    }

    #[test]
    fn test_clean_dest() {
        assert_eq!(clean_dest(Path::new("dist/app")), PathBuf::from("dist/app.css"));
        assert_eq!(clean_dest(Path::new("dist/app.css")), PathBuf::from("dist/app.css"));
        assert_eq!(clean_dest(Path::new("dist/app.min.css")), PathBuf::from("dist/app.css"));
    }

    #[test]
    fn test_minified_dest() {
        assert_eq!(minified_dest(Path::new("dist/app")), PathBuf::from("dist/app.min.css"));
        assert_eq!(minified_dest(Path::new("dist/app.css")), PathBuf::from("dist/app.min.css"));
        assert_eq!(minified_dest(Path::new("dist/app.min.css")), PathBuf::from("dist/app.min.css"));
    }

    #[test]
    fn test_minified_dest_keeps_existing_min_suffix() {
        let once = minified_dest(Path::new("dist/app.min.css"));
        assert_eq!(once, PathBuf::from("dist/app.min.css"));
        assert_eq!(minified_dest(&once), once);
        assert_eq!(clean_dest(&once), PathBuf::from("dist/app.css"));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_extension_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dest = Path::new(OsStr::from_bytes(b"dist/\xffapp"));
        let clean = clean_dest(dest);
        assert_eq!(clean.as_os_str().as_bytes(), b"dist/\xffapp.css");

        let minified = minified_dest(&clean);
        assert_eq!(minified.as_os_str().as_bytes(), b"dist/\xffapp.min.css");
    }

    #[test]
    fn test_nest_under_relative() {
        assert_eq!(nest_under(Path::new("/tmp"), Path::new("styles/b.less")), PathBuf::from("/tmp/styles/b.less"));
    }

    #[test]
    fn test_nest_under_absolute() {
        assert_eq!(
            nest_under(Path::new("/tmp/glue"), Path::new("/home/me/site/b.less")),
            PathBuf::from("/tmp/glue/home/me/site/b.less")
        );
    }

    #[test]
    fn test_nest_under_parent_dirs() {
        assert_eq!(nest_under(Path::new("/tmp"), Path::new("./a/../b/c.css")), PathBuf::from("/tmp/b/c.css"));
        assert_eq!(nest_under(Path::new("/tmp"), Path::new("../../c.css")), PathBuf::from("/tmp/c.css"));
    }

    #[test]
    fn test_preprocessed_dest() {
        assert_eq!(
            preprocessed_dest(Path::new("/tmp"), Path::new("b.less")),
            PathBuf::from("/tmp/b.less.css")
        );
    }
}
