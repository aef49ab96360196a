//! Loading site descriptions from JSON, YAML or TOML.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::description::SiteDescription;

/// Serialization format of a site description file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptionFormat {
    Json,
    Yaml,
    Toml,
}

impl DescriptionFormat {
    /// Infer the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }
}

impl FromStr for DescriptionFormat {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(SourceError::UnsupportedFormat(other.to_owned())),
        }
    }
}

impl fmt::Display for DescriptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        })
    }
}

/// Error loading a site description.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Description file not found.
    #[error("Site description not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Unknown format name or file extension.
    #[error("Unsupported site description format: {0}")]
    UnsupportedFormat(String),
}

/// Parse a site description from a string.
///
/// # Errors
///
/// Returns an error if the content is not valid for `format`.
pub fn parse_description(
    content: &str,
    format: DescriptionFormat,
) -> Result<SiteDescription, SourceError> {
    let description = match format {
        DescriptionFormat::Json => serde_json::from_str(content)?,
        DescriptionFormat::Yaml => serde_yaml::from_str(content)?,
        DescriptionFormat::Toml => toml::from_str(content)?,
    };
    Ok(description)
}

/// Load a site description from a file.
///
/// If `format` is `None`, it is inferred from the file extension.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, has an unknown
/// extension, or fails to parse.
pub fn load_description(
    path: &Path,
    format: Option<DescriptionFormat>,
) -> Result<SiteDescription, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    let format = match format {
        Some(format) => format,
        None => DescriptionFormat::from_path(path).ok_or_else(|| {
            SourceError::UnsupportedFormat(path.display().to_string())
        })?,
    };
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), %format, "Loading site description");
    parse_description(&content, format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::resolve;

    const JSON: &str = r#"{
        "title": "Cryptography 101",
        "description": "A complete guide to cryptography and its role in CTF challenges.",
        "nav": [{"text": "Home", "link": "/"}],
        "sidebar": {
            "/": [
                {"text": "Introduction", "link": "/"},
                {"text": "History of Cryptography", "collapsed": "True", "items": [
                    {"text": "History", "link": "/history/intro"}
                ]}
            ]
        }
    }"#;

    const YAML: &str = r#"
title: Cryptography 101
description: A complete guide to cryptography and its role in CTF challenges.
nav:
  - text: Home
    link: /
sidebar:
  /:
    - text: Introduction
      link: /
    - text: History of Cryptography
      collapsed: "True"
      items:
        - text: History
          link: /history/intro
"#;

    const TOML: &str = r#"
title = "Cryptography 101"
description = "A complete guide to cryptography and its role in CTF challenges."

[[nav]]
text = "Home"
link = "/"

[[sidebar."/"]]
text = "Introduction"
link = "/"

[[sidebar."/"]]
text = "History of Cryptography"
collapsed = "True"
items = [{ text = "History", link = "/history/intro" }]
"#;

    #[test]
    fn test_formats_resolve_to_equal_models() {
        let json = parse_description(JSON, DescriptionFormat::Json).unwrap();
        let yaml = parse_description(YAML, DescriptionFormat::Yaml).unwrap();
        let toml = parse_description(TOML, DescriptionFormat::Toml).unwrap();

        assert_eq!(json, yaml);
        assert_eq!(json, toml);

        let resolved = resolve(&json).unwrap();
        assert_eq!(resolved, resolve(&yaml).unwrap());
        assert_eq!(resolved, resolve(&toml).unwrap());
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_toml_keeps_section_order() {
        let toml = r#"
title = "Cryptography 101"
description = "A complete guide to cryptography and its role in CTF challenges."

[[sidebar."/zeta/"]]
text = "Zeta"
link = "/zeta/intro"

[[sidebar."/alpha/"]]
text = "Alpha"
link = "/alpha/intro"
"#;
        let yaml = r#"
title: Cryptography 101
description: A complete guide to cryptography and its role in CTF challenges.
sidebar:
  /zeta/:
    - text: Zeta
      link: /zeta/intro
  /alpha/:
    - text: Alpha
      link: /alpha/intro
"#;
        let from_toml = parse_description(toml, DescriptionFormat::Toml).unwrap();
        let from_yaml = parse_description(yaml, DescriptionFormat::Yaml).unwrap();

        let prefixes: Vec<_> = from_toml.theme.sidebar.iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, vec!["/zeta/", "/alpha/"]);
        assert_eq!(from_toml, from_yaml);

        let model = resolve(&from_toml).unwrap().model;
        assert_eq!(model.sidebar()[0].prefix, "/zeta/");
        assert_eq!(model.routes()[0].path, "/zeta/intro");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DescriptionFormat::from_path(Path::new("site.json")),
            Some(DescriptionFormat::Json)
        );
        assert_eq!(
            DescriptionFormat::from_path(Path::new("site.YML")),
            Some(DescriptionFormat::Yaml)
        );
        assert_eq!(
            DescriptionFormat::from_path(Path::new("site.toml")),
            Some(DescriptionFormat::Toml)
        );
        assert_eq!(DescriptionFormat::from_path(Path::new("site.js")), None);
        assert_eq!(DescriptionFormat::from_path(Path::new("site")), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yaml");
        std::fs::write(&path, YAML).unwrap();

        let description = load_description(&path, None).unwrap();
        assert_eq!(description.title, "Cryptography 101");
    }

    #[test]
    fn test_load_with_explicit_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.conf");
        std::fs::write(&path, JSON).unwrap();

        assert!(matches!(
            load_description(&path, None),
            Err(SourceError::UnsupportedFormat(_))
        ));
        let description = load_description(&path, Some(DescriptionFormat::Json)).unwrap();
        assert_eq!(description.theme.nav.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_description(Path::new("/nonexistent/site.yaml"), None);
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = parse_description("title: [unclosed", DescriptionFormat::Yaml);
        assert!(matches!(result, Err(SourceError::Yaml(_))));
    }
}
