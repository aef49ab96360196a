//! Site description parsing and navigation model resolution.
//!
//! This crate provides:
//! - [`SiteDescription`]: declarative site structure as authors write it
//! - [`resolve`]: validation and normalization into a [`ResolvedModel`]
//! - [`load_description`]: loading descriptions from JSON, YAML or TOML
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use sitenav_model::{load_description, resolve};
//!
//! let description = load_description(Path::new("site.yaml"), None)?;
//! let resolution = resolve(&description)?;
//!
//! for warning in &resolution.warnings {
//!     eprintln!("warning: {warning}");
//! }
//!
//! // Breadcrumb labels for a page
//! let crumbs = resolution.model.breadcrumbs("/hashing/algorithms/md5");
//! # Ok(())
//! # }
//! ```

mod description;
mod error;
mod model;
mod path;
mod resolver;
mod source;

pub use description::{
    EditLink, Footer, HeadTag, NavEntry, SearchConfig, SidebarItem, SidebarSections,
    SiteDescription, SocialLink, ThemeConfig,
};
pub use error::{ResolveError, ResolveWarning};
pub use model::{
    NavTarget, PageNeighbors, ResolvedModel, ResolvedNavEntry, ResolvedRoute, SidebarNode,
    SidebarSection, SiteInfo,
};
pub use resolver::{Resolution, ResolveOptions, Resolver, resolve};
pub use source::{DescriptionFormat, SourceError, load_description, parse_description};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CRYPTOGRAPHY101: &str = include_str!("../fixtures/cryptography101.yaml");

    fn resolve_fixture() -> Resolution {
        let description = parse_description(CRYPTOGRAPHY101, DescriptionFormat::Yaml).unwrap();
        resolve(&description).unwrap()
    }

    #[test]
    fn test_fixture_resolves() {
        let resolution = resolve_fixture();
        let model = &resolution.model;

        assert_eq!(model.site().title, "Cryptography 101");
        assert_eq!(model.site().search_provider.as_deref(), Some("local"));
        assert!(model.site().last_updated);
        assert_eq!(model.site().head.len(), 5);
        assert_eq!(model.nav_entries().len(), 3);
        assert_eq!(model.social_links().len(), 2);
        assert_eq!(model.sidebar().len(), 1);
        assert_eq!(model.sidebar()[0].items.len(), 7);
        assert_eq!(model.routes().len(), 74);
    }

    #[test]
    fn test_fixture_string_flag_warning() {
        let resolution = resolve_fixture();
        assert_eq!(
            resolution.warnings,
            vec![ResolveWarning::TypeCoercion {
                field: "collapsed".to_owned(),
                location: "sidebar[/] > Mathematics".to_owned(),
                value: "True".to_owned(),
                coerced: true,
            }]
        );
    }

    #[test]
    fn test_fixture_lookups() {
        let model = resolve_fixture().model;

        assert_eq!(
            model.breadcrumbs("/hashing/algorithms/md5").unwrap(),
            ["Hashing", "Common Hash Algorithms", "MD5"]
        );

        let neighbors = model.neighbors("/history/ancient");
        assert_eq!(neighbors.prev.unwrap().path, "/history/intro");
        assert_eq!(neighbors.next.unwrap().path, "/history/classical");

        assert_eq!(model.sidebar_for("/hashing/algorithms/md5").unwrap().prefix, "/");
        assert_eq!(
            model.edit_link("/hashing/intro").as_deref(),
            Some("https://github.com/crypt0-wizard/cryptography101/edit/main/docs/hashing/intro.md")
        );
    }

    #[test]
    fn test_fixture_serializes() {
        let model = resolve_fixture().model;
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["site"]["title"], "Cryptography 101");
        assert_eq!(json["routes"].as_array().unwrap().len(), 74);
        assert_eq!(json["sidebar"][0]["items"][2]["kind"], "group");
        assert_eq!(json["sidebar"][0]["items"][2]["collapsed_by_default"], true);
        assert_eq!(json["nav_entries"][0]["target"]["kind"], "internal");
    }
}
