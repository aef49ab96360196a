//! Link target classification and route path normalization.

use url::Url;

/// Classified link target.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Target {
    /// Internal route path, normalized.
    Internal(RoutePath),
    /// Absolute external URL.
    External(Url),
}

/// Classify a link target as an internal route or an external URL.
///
/// Returns a short reason on failure, used in [`ResolveError::InvalidTarget`](crate::ResolveError).
pub(crate) fn classify_target(raw: &str, clean_urls: bool) -> Result<Target, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("target is empty");
    }
    if raw.starts_with('/') {
        return parse_route(raw, clean_urls).map(Target::Internal);
    }
    let url = Url::parse(raw).map_err(|_| "not a route path or absolute URL")?;
    if url.has_host() || url.scheme() == "mailto" {
        Ok(Target::External(url))
    } else {
        Err("URL has no host")
    }
}

/// Normalized internal route path.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RoutePath {
    pub path: String,
    /// Served from a directory index (`/guide/`, `/guide/index.html`).
    pub directory: bool,
}

/// Validate and normalize an internal route path.
///
/// With `clean_urls`, `/guide/`, `/guide.html`, `/guide.md` and
/// `/guide/index.html` all normalize to `/guide`. The root path is always `/`.
pub(crate) fn normalize_route(raw: &str, clean_urls: bool) -> Result<String, &'static str> {
    parse_route(raw, clean_urls).map(|route| route.path)
}

/// Validate and normalize an internal route path, keeping track of whether it
/// names a directory index.
pub(crate) fn parse_route(raw: &str, clean_urls: bool) -> Result<RoutePath, &'static str> {
    if !raw.starts_with('/') {
        return Err("route path must start with '/'");
    }
    if raw.starts_with("//") {
        return Err("protocol-relative URLs are not route paths");
    }
    if raw.chars().any(char::is_whitespace) {
        return Err("route path contains whitespace");
    }
    if raw.contains(['?', '#']) {
        return Err("route path contains a query or fragment");
    }
    if raw.split('/').any(|segment| segment == "..") {
        return Err("route path contains '..'");
    }

    let stem = strip_page_extension(raw);
    let directory = raw.ends_with('/') || last_segment(stem) == "index";

    if !clean_urls {
        return Ok(RoutePath {
            path: raw.to_owned(),
            directory,
        });
    }

    let stem = match stem.strip_suffix("index") {
        Some(parent) if parent.ends_with('/') => parent,
        _ => stem,
    };
    let path = stem.trim_end_matches('/');
    Ok(RoutePath {
        path: if path.is_empty() {
            "/".to_owned()
        } else {
            path.to_owned()
        },
        directory,
    })
}

fn strip_page_extension(path: &str) -> &str {
    [".html", ".md"]
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Source file path (relative, without leading slash) of a route.
///
/// Directory routes map to `index.md` inside the directory.
pub(crate) fn source_file(route: &str, directory: bool) -> String {
    let stem = strip_page_extension(route.trim_matches('/'));
    if stem.is_empty() {
        "index.md".to_owned()
    } else if directory && last_segment(stem) != "index" {
        format!("{stem}/index.md")
    } else {
        format!("{stem}.md")
    }
}

/// Check whether `path` falls under the sidebar `prefix`.
pub(crate) fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clean_urls() {
        assert_eq!(normalize_route("/", true).unwrap(), "/");
        assert_eq!(normalize_route("/tools", true).unwrap(), "/tools");
        assert_eq!(normalize_route("/tools/", true).unwrap(), "/tools");
        assert_eq!(normalize_route("/tools.html", true).unwrap(), "/tools");
        assert_eq!(normalize_route("/tools.md", true).unwrap(), "/tools");
        assert_eq!(normalize_route("/index.html", true).unwrap(), "/");
        assert_eq!(normalize_route("/history/index.md", true).unwrap(), "/history");
        assert_eq!(normalize_route("/reindex", true).unwrap(), "/reindex");
    }

    #[test]
    fn test_normalize_verbatim_without_clean_urls() {
        assert_eq!(normalize_route("/tools/", false).unwrap(), "/tools/");
        assert_eq!(normalize_route("/tools.html", false).unwrap(), "/tools.html");
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        assert!(normalize_route("tools", true).is_err());
        assert!(normalize_route("//cdn.example.com/x", true).is_err());
        assert!(normalize_route("/a b", true).is_err());
        assert!(normalize_route("/a?x=1", true).is_err());
        assert!(normalize_route("/a#frag", true).is_err());
        assert!(normalize_route("/a/../b", true).is_err());
    }

    #[test]
    fn test_classify_internal_and_external() {
        assert_eq!(
            classify_target("/books", true).unwrap(),
            Target::Internal(RoutePath {
                path: "/books".to_owned(),
                directory: false,
            })
        );
        assert!(matches!(
            classify_target("https://github.com/crypt0-wizard", true).unwrap(),
            Target::External(_)
        ));
        assert!(matches!(
            classify_target("mailto:team@example.com", true).unwrap(),
            Target::External(_)
        ));
    }

    #[test]
    fn test_classify_rejects_garbage() {
        assert_eq!(classify_target("", true), Err("target is empty"));
        assert_eq!(classify_target("   ", true), Err("target is empty"));
        assert!(classify_target("books", true).is_err());
        assert!(classify_target("https://", true).is_err());
    }

    #[test]
    fn test_directory_routes() {
        for raw in ["/history/", "/history/index", "/history/index.html", "/index.md", "/"] {
            assert!(parse_route(raw, true).unwrap().directory, "{raw}");
        }
        for raw in ["/history", "/history.html", "/reindex"] {
            assert!(!parse_route(raw, true).unwrap().directory, "{raw}");
        }
        assert_eq!(
            parse_route("/history/index.html", false).unwrap(),
            RoutePath {
                path: "/history/index.html".to_owned(),
                directory: true,
            }
        );
    }

    #[test]
    fn test_source_file() {
        assert_eq!(source_file("/", true), "index.md");
        assert_eq!(source_file("/hashing/intro", false), "hashing/intro.md");
        assert_eq!(source_file("/guide", true), "guide/index.md");
        assert_eq!(source_file("/guide/", true), "guide/index.md");
        assert_eq!(source_file("/guide/index.html", true), "guide/index.md");
        assert_eq!(source_file("/tools.html", false), "tools.md");
    }

    #[test]
    fn test_matches_prefix() {
        assert!(matches_prefix("/anything", "/"));
        assert!(matches_prefix("/hashing", "/hashing/"));
        assert!(matches_prefix("/hashing/md5", "/hashing/"));
        assert!(!matches_prefix("/hashingx", "/hashing/"));
        assert!(!matches_prefix("/history", "/hashing"));
    }
}
