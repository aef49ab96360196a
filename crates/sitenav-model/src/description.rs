//! Site description input types.
//!
//! These types mirror the declarative site configuration as authors write it.
//! They are deliberately loose: every field that hand-edited configuration gets
//! wrong in practice (missing labels, `collapsed: "True"`, empty groups) is
//! accepted here and checked by the [`resolve`](crate::resolve) step, which
//! can then report the offending node with its breadcrumb.
//!
//! Field names follow the camelCase configuration style. Alternative spellings
//! are accepted as aliases (`label` for `text`, `target` for `link`,
//! `children` for `items`, `navItems` for `nav`, and so on). Theme settings may
//! sit at the top level or under `themeConfig`.
//!
//! Keys that match no field are kept in `extra` maps so resolution can warn
//! about them instead of dropping a typo such as `sidbar` silently.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Root site description document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDescription {
    /// Site title.
    #[serde(default)]
    pub title: String,

    /// Site description used for metadata.
    #[serde(default)]
    pub description: String,

    /// Extra `<head>` tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,

    /// Named sidebar groups placed with `include`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<String, SidebarItem>,

    /// Theme settings written at the top level of the document.
    #[serde(flatten)]
    pub theme: ThemeConfig,

    /// Theme settings nested under `themeConfig`, the way the site generator
    /// config is written. Merged with [`SiteDescription::theme`] during
    /// resolution; a field may be set in only one of the two places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_config: Option<ThemeConfig>,
}

/// Navigation, sidebar and presentation settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Top navigation entries in display order.
    #[serde(default, alias = "navItems", skip_serializing_if = "Vec::is_empty")]
    pub nav: Vec<NavEntry>,

    /// Sidebars keyed by route prefix, in declaration order.
    #[serde(
        default,
        alias = "sidebarSections",
        skip_serializing_if = "SidebarSections::is_empty"
    )]
    pub sidebar: SidebarSections,

    /// Social/footer links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLink>,

    /// Site logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Search provider configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,

    /// Footer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,

    /// "Edit this page" link configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLink>,

    /// Whether pages show a last-updated timestamp. Loosely typed, see
    /// [`SidebarItem::collapsed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<serde_json::Value>,

    /// Keys not defined above, reported as warnings during resolution.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Top navigation entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Display label.
    #[serde(default, alias = "label", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Internal route path or absolute URL.
    #[serde(default, alias = "target", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl NavEntry {
    /// Create a navigation entry.
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            link: Some(link.into()),
            extra: BTreeMap::new(),
        }
    }
}

/// Raw sidebar item.
///
/// A single shape covers pages, groups and includes; the resolver classifies
/// each item by which fields are present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    /// Display label.
    #[serde(default, alias = "label", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Route path of the page this item links to.
    #[serde(default, alias = "target", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Whether the group starts collapsed.
    ///
    /// Kept as a raw value because real configuration mixes `true` with
    /// `"True"`. Normalized to a boolean during resolution.
    #[serde(
        default,
        alias = "collapsedByDefault",
        skip_serializing_if = "Option::is_none"
    )]
    pub collapsed: Option<serde_json::Value>,

    /// Child items.
    #[serde(default, alias = "children", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SidebarItem>>,

    /// Name of a group from [`SiteDescription::groups`] to place here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    /// Unrecognized keys such as a misspelled `colapsed`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SidebarItem {
    /// Create a page item.
    #[must_use]
    pub fn page(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Create a group item.
    #[must_use]
    pub fn group(text: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self {
            text: Some(text.into()),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Create an include item referencing a named group.
    #[must_use]
    pub fn include(name: impl Into<String>) -> Self {
        Self {
            include: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the raw `collapsed` value.
    #[must_use]
    pub fn with_collapsed(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.collapsed = Some(value.into());
        self
    }
}

/// Social link (`{icon, link}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Platform name, e.g. "github".
    #[serde(default, alias = "platform")]
    pub icon: String,
    /// Link URL.
    #[serde(default, alias = "url")]
    pub link: String,
}

/// `<head>` tag as `[tag, {attr: value}]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadTag(pub String, pub BTreeMap<String, String>);

/// Search provider configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Provider name, e.g. "local".
    pub provider: String,
}

/// Footer text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// "Edit this page" link configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditLink {
    /// URL pattern containing the `:path` placeholder.
    pub pattern: String,
    /// Link text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Sidebars keyed by route prefix.
///
/// Deserializes from a mapping (keeping declaration order, which drives menu
/// order) or from a bare sequence, which becomes a single section keyed `/`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SidebarSections(Vec<(String, Vec<SidebarItem>)>);

impl SidebarSections {
    /// Create sections from `(prefix, items)` pairs in order.
    #[must_use]
    pub fn new(sections: Vec<(String, Vec<SidebarItem>)>) -> Self {
        Self(sections)
    }

    /// Append a section.
    pub fn push(&mut self, prefix: impl Into<String>, items: Vec<SidebarItem>) {
        self.0.push((prefix.into(), items));
    }

    /// Iterate sections in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarItem])> {
        self.0
            .iter()
            .map(|(prefix, items)| (prefix.as_str(), items.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SidebarSections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (prefix, items) in &self.0 {
            map.serialize_entry(prefix, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SidebarSections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = SidebarSections;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of route prefix to sidebar items, or a list of sidebar items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut sections = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((prefix, items)) = access.next_entry::<String, Vec<SidebarItem>>()? {
                    sections.push((prefix, items));
                }
                Ok(SidebarSections(sections))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(item) = access.next_element::<SidebarItem>()? {
                    items.push(item);
                }
                Ok(SidebarSections(vec![("/".to_owned(), items)]))
            }
        }

        deserializer.deserialize_any(SectionsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_map_preserves_declaration_order() {
        let json = r#"{
            "/zeta/": [{"text": "Z", "link": "/zeta/"}],
            "/alpha/": [{"text": "A", "link": "/alpha/"}],
            "/": [{"text": "Home", "link": "/"}]
        }"#;
        let sections: SidebarSections = serde_json::from_str(json).unwrap();
        let prefixes: Vec<_> = sections.iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, vec!["/zeta/", "/alpha/", "/"]);
    }

    #[test]
    fn test_sidebar_sequence_becomes_root_section() {
        let json = r#"[{"text": "Intro", "link": "/intro"}]"#;
        let sections: SidebarSections = serde_json::from_str(json).unwrap();
        assert_eq!(sections.len(), 1);
        let (prefix, items) = sections.iter().next().unwrap();
        assert_eq!(prefix, "/");
        assert_eq!(items[0].text.as_deref(), Some("Intro"));
    }

    #[test]
    fn test_aliases_accepted() {
        let json = r#"{
            "title": "T",
            "description": "D",
            "navItems": [{"label": "Home", "target": "/"}],
            "sidebarSections": {"/": [
                {"label": "G", "collapsedByDefault": "True", "children": [
                    {"label": "P", "target": "/p"}
                ]}
            ]},
            "socialLinks": [{"platform": "github", "url": "https://github.com/x"}]
        }"#;
        let desc: SiteDescription = serde_json::from_str(json).unwrap();
        assert_eq!(desc.theme.nav, vec![NavEntry::new("Home", "/")]);
        let (_, items) = desc.theme.sidebar.iter().next().unwrap();
        assert_eq!(items[0].collapsed, Some(serde_json::json!("True")));
        assert_eq!(items[0].items.as_ref().unwrap()[0].link.as_deref(), Some("/p"));
        assert_eq!(desc.theme.social_links[0].icon, "github");
        assert_eq!(desc.theme.social_links[0].link, "https://github.com/x");
        assert!(desc.theme.extra.is_empty());
    }

    #[test]
    fn test_theme_config_nesting() {
        let json = r#"{
            "title": "Cryptography 101",
            "description": "D",
            "themeConfig": {
                "logo": "/logo.png",
                "nav": [{"text": "Home", "link": "/"}],
                "sidebar": {"/": [{"text": "Intro", "link": "/"}]}
            }
        }"#;
        let desc: SiteDescription = serde_json::from_str(json).unwrap();
        assert!(desc.theme.nav.is_empty());
        assert!(desc.theme.extra.is_empty());
        let theme = desc.theme_config.unwrap();
        assert_eq!(theme.logo.as_deref(), Some("/logo.png"));
        assert_eq!(theme.nav.len(), 1);
        assert_eq!(theme.sidebar.len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let json = r#"{
            "title": "T",
            "sidbar": {"/": []},
            "nav": [{"text": "Home", "link": "/", "icon": "home"}],
            "sidebar": {"/": [{"text": "G", "colapsed": "maybe", "items": [
                {"text": "P", "link": "/p"}
            ]}]}
        }"#;
        let desc: SiteDescription = serde_json::from_str(json).unwrap();
        assert_eq!(desc.theme.extra.keys().collect::<Vec<_>>(), vec!["sidbar"]);
        assert!(desc.theme.nav[0].extra.contains_key("icon"));
        let (_, items) = desc.theme.sidebar.iter().next().unwrap();
        assert_eq!(items[0].extra.get("colapsed"), Some(&serde_json::json!("maybe")));
        assert_eq!(items[0].collapsed, None);
    }

    #[test]
    fn test_head_tag_from_pair() {
        let json = r#"[["meta", {"name": "robots", "content": "index, follow"}]]"#;
        let head: Vec<HeadTag> = serde_json::from_str(json).unwrap();
        assert_eq!(head[0].0, "meta");
        assert_eq!(head[0].1.get("content").map(String::as_str), Some("index, follow"));
    }

    #[test]
    fn test_serialize_sections_as_map() {
        let sections = SidebarSections::new(vec![(
            "/".to_owned(),
            vec![SidebarItem::page("Intro", "/")],
        )]);
        let value = serde_json::to_value(&sections).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"/": [{"text": "Intro", "link": "/"}]})
        );
    }
}
