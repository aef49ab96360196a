//! Resolved navigation model.
//!
//! The model is immutable once built by [`resolve`](crate::resolve) and is
//! consumed read-only by a renderer (walking [`ResolvedModel::sidebar`]) and a
//! router (looking up [`ResolvedModel::route`]).
//!
//! # Architecture
//!
//! Routes are stored in a flat `Vec<ResolvedRoute>` in depth-first sidebar
//! order, with a `path_index` `HashMap` for O(1) lookups by path. Sections are
//! contiguous in that vector, which makes previous/next page lookups a
//! neighbour check.

use std::collections::HashMap;

use serde::Serialize;

use crate::description::{EditLink, Footer, HeadTag, SocialLink};
use crate::path::{matches_prefix, normalize_route, source_file};

/// Resolved sidebar node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SidebarNode {
    /// Link to a content page.
    Page {
        /// Display label.
        label: String,
        /// Normalized route path.
        path: String,
    },
    /// Group of other nodes.
    Group {
        /// Display label.
        label: String,
        /// Optional landing page of the group.
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        /// Whether the group starts collapsed.
        collapsed_by_default: bool,
        /// Whether the group can be collapsed at all (a `collapsed` flag was declared).
        collapsible: bool,
        /// Child nodes in declaration order.
        children: Vec<SidebarNode>,
    },
}

impl SidebarNode {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Page { label, .. } | Self::Group { label, .. } => label,
        }
    }

    /// Route path, if the node links to a page.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Page { path, .. } => Some(path),
            Self::Group { path, .. } => path.as_deref(),
        }
    }

    /// Child nodes (empty for pages).
    #[must_use]
    pub fn children(&self) -> &[SidebarNode] {
        match self {
            Self::Page { .. } => &[],
            Self::Group { children, .. } => children,
        }
    }
}

/// Sidebar for one route prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    /// Route prefix this sidebar is shown for.
    pub prefix: String,
    /// Top-level nodes.
    pub items: Vec<SidebarNode>,
}

/// Entry of the route table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Normalized route path (unique across the model).
    pub path: String,
    /// Display label.
    pub label: String,
    /// Labels from the sidebar root down to and including this node.
    pub breadcrumb: Vec<String>,
    /// Prefix of the sidebar section that declares this route.
    pub section: String,
    /// Declared as a directory index (`/guide/` or `/guide/index.html`).
    pub directory: bool,
}

/// Link target of a top navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum NavTarget {
    /// Normalized internal route path.
    Internal(String),
    /// Absolute external URL.
    External(String),
}

/// Validated top navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedNavEntry {
    pub label: String,
    pub target: NavTarget,
}

/// Site-wide presentation metadata passed through to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLink>,
    pub last_updated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,
}

/// Previous and next pages relative to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageNeighbors<'a> {
    pub prev: Option<&'a ResolvedRoute>,
    pub next: Option<&'a ResolvedRoute>,
}

/// Validated, render-ready navigation model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedModel {
    site: SiteInfo,
    nav_entries: Vec<ResolvedNavEntry>,
    sidebar: Vec<SidebarSection>,
    routes: Vec<ResolvedRoute>,
    social_links: Vec<SocialLink>,
    #[serde(skip)]
    path_index: HashMap<String, usize>,
    #[serde(skip)]
    clean_urls: bool,
}

impl ResolvedModel {
    /// Assemble a model from resolved parts.
    ///
    /// Callers guarantee that route paths are unique.
    pub(crate) fn new(
        site: SiteInfo,
        nav_entries: Vec<ResolvedNavEntry>,
        sidebar: Vec<SidebarSection>,
        routes: Vec<ResolvedRoute>,
        social_links: Vec<SocialLink>,
        clean_urls: bool,
    ) -> Self {
        let path_index = routes
            .iter()
            .enumerate()
            .map(|(i, route)| (route.path.clone(), i))
            .collect();

        Self {
            site,
            nav_entries,
            sidebar,
            routes,
            social_links,
            path_index,
            clean_urls,
        }
    }

    /// Site metadata.
    #[must_use]
    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    /// Top navigation entries in display order.
    #[must_use]
    pub fn nav_entries(&self) -> &[ResolvedNavEntry] {
        &self.nav_entries
    }

    /// Sidebar sections in declaration order.
    #[must_use]
    pub fn sidebar(&self) -> &[SidebarSection] {
        &self.sidebar
    }

    /// All routes in depth-first sidebar order.
    #[must_use]
    pub fn routes(&self) -> &[ResolvedRoute] {
        &self.routes
    }

    /// Social links.
    #[must_use]
    pub fn social_links(&self) -> &[SocialLink] {
        &self.social_links
    }

    /// Check whether the model has no navigation at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nav_entries.is_empty() && self.sidebar.is_empty()
    }

    fn index_of(&self, path: &str) -> Option<usize> {
        let path = normalize_route(path, self.clean_urls).ok()?;
        self.path_index.get(&path).copied()
    }

    /// Get route by path.
    ///
    /// The path is normalized the same way as sidebar targets, so `/guide/`
    /// finds `/guide` when clean URLs are enabled.
    #[must_use]
    pub fn route(&self, path: &str) -> Option<&ResolvedRoute> {
        self.index_of(path).map(|i| &self.routes[i])
    }

    /// Breadcrumb labels for a route.
    #[must_use]
    pub fn breadcrumbs(&self, path: &str) -> Option<&[String]> {
        self.route(path).map(|route| route.breadcrumb.as_slice())
    }

    /// Sidebar to display for a path.
    ///
    /// Picks the section with the longest prefix matching the path.
    #[must_use]
    pub fn sidebar_for(&self, path: &str) -> Option<&SidebarSection> {
        let path = normalize_route(path, self.clean_urls).ok()?;
        self.sidebar
            .iter()
            .filter(|section| matches_prefix(&path, &section.prefix))
            .max_by_key(|section| section.prefix.trim_end_matches('/').len())
    }

    /// Previous and next pages within the same sidebar section.
    #[must_use]
    pub fn neighbors(&self, path: &str) -> PageNeighbors<'_> {
        let Some(idx) = self.index_of(path) else {
            return PageNeighbors::default();
        };
        let section = &self.routes[idx].section;
        let same_section = |route: &&ResolvedRoute| &route.section == section;

        PageNeighbors {
            prev: idx
                .checked_sub(1)
                .and_then(|i| self.routes.get(i))
                .filter(same_section),
            next: self.routes.get(idx + 1).filter(same_section),
        }
    }

    /// "Edit this page" URL for a route.
    ///
    /// Returns `None` if no edit link is configured or the route is unknown.
    #[must_use]
    pub fn edit_link(&self, path: &str) -> Option<String> {
        let pattern = &self.site.edit_link.as_ref()?.pattern;
        let route = self.route(path)?;
        Some(pattern.replace(":path", &source_file(&route.path, route.directory)))
    }
}
