//! Site description resolution.
//!
//! Turns a loosely-typed [`SiteDescription`] into a [`ResolvedModel`]:
//!
//! 1. Top-level `title` and `description` must be non-empty.
//! 2. Navigation entries must target a route path or an absolute URL.
//! 3. Sidebar sections are walked depth-first in declaration order. Each item
//!    is classified as a page, a group or an include; `collapsed` flags are
//!    normalized to booleans; every internal target is registered as a route.
//! 4. Includes are expanded against [`SiteDescription::groups`] while tracking
//!    the chain of groups being expanded, so a group that (transitively)
//!    includes itself is reported instead of recursing forever.
//!
//! Resolution is atomic: the first error aborts and no partial model is
//! returned. Warnings are logged and returned with the model.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::description::{NavEntry, SidebarItem, SiteDescription, SocialLink, ThemeConfig};
use crate::error::{ResolveError, ResolveWarning};
use crate::model::{
    NavTarget, ResolvedModel, ResolvedNavEntry, ResolvedRoute, SidebarNode, SidebarSection,
    SiteInfo,
};
use crate::path::{RoutePath, Target, classify_target};

/// Options controlling resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Reject string-encoded booleans instead of coercing them with a warning.
    pub strict_coercion: bool,
    /// Treat `/page`, `/page/`, `/page.html` and `/page.md` as the same route.
    pub clean_urls: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            strict_coercion: false,
            clean_urls: true,
        }
    }
}

/// Successful resolution result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved navigation model.
    pub model: ResolvedModel,
    /// Non-fatal findings, in the order they were encountered.
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve a site description with default options.
///
/// # Errors
///
/// Returns the first [`ResolveError`] found; no partial model is produced.
pub fn resolve(description: &SiteDescription) -> Result<Resolution, ResolveError> {
    Resolver::default().resolve(description)
}

/// Navigation model resolver.
///
/// Stateless apart from its options; a single resolver can be shared and used
/// from several threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    /// Create a resolver with the given options.
    #[must_use]
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// Resolver options.
    #[must_use]
    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolve a site description.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`] found; no partial model is produced.
    pub fn resolve(&self, description: &SiteDescription) -> Result<Resolution, ResolveError> {
        let mut walker = Walker::new(self.options, &description.groups);

        require_non_empty(&description.title, "title", "site")?;
        require_non_empty(&description.description, "description", "site")?;

        walker.report_unknown_fields(&description.theme.extra, "site");
        if let Some(nested) = &description.theme_config {
            walker.report_unknown_fields(&nested.extra, "themeConfig");
        }
        let theme = merge_theme(description)?;

        let mut nav_entries = Vec::with_capacity(theme.nav.len());
        for (i, entry) in theme.nav.iter().enumerate() {
            let location = format!("nav[{i}]");
            walker.report_unknown_fields(&entry.extra, &location);
            nav_entries.push(self.resolve_nav_entry(entry, &location)?);
        }

        let social_links = theme
            .social_links
            .iter()
            .enumerate()
            .map(|(i, link)| validate_social_link(link, i))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sidebar = Vec::with_capacity(theme.sidebar.len());
        let mut prefixes: HashMap<&str, &str> = HashMap::new();
        for (prefix, items) in theme.sidebar.iter() {
            let location = format!("sidebar[{prefix}]");
            let invalid = |reason: String| ResolveError::InvalidTarget {
                target: prefix.to_owned(),
                location: location.clone(),
                reason,
            };
            if !prefix.starts_with('/') {
                return Err(invalid("sidebar prefix must start with '/'".to_owned()));
            }
            if let Some(first) = prefixes.insert(prefix.trim_end_matches('/'), prefix) {
                return Err(invalid(format!(
                    "duplicate sidebar prefix, already declared as `{first}`"
                )));
            }
            let mut trail = Vec::new();
            let items = walker.walk_items(items, prefix, &location, &mut trail)?;
            sidebar.push(SidebarSection {
                prefix: prefix.to_owned(),
                items,
            });
        }

        let last_updated = match &theme.last_updated {
            Some(value) => walker.coerce_flag(value, "lastUpdated", "site")?,
            None => false,
        };

        let site = SiteInfo {
            title: description.title.clone(),
            description: description.description.clone(),
            logo: theme.logo.clone(),
            search_provider: theme.search.as_ref().map(|s| s.provider.clone()),
            footer: theme.footer.clone(),
            edit_link: theme.edit_link.clone(),
            last_updated,
            head: description.head.clone(),
        };

        tracing::debug!(
            nav_entries = nav_entries.len(),
            sections = sidebar.len(),
            routes = walker.routes.len(),
            warnings = walker.warnings.len(),
            "Site description resolved"
        );

        let model = ResolvedModel::new(
            site,
            nav_entries,
            sidebar,
            walker.routes,
            social_links,
            self.options.clean_urls,
        );

        Ok(Resolution {
            model,
            warnings: walker.warnings,
        })
    }

    fn resolve_nav_entry(
        &self,
        entry: &NavEntry,
        location: &str,
    ) -> Result<ResolvedNavEntry, ResolveError> {
        let label = entry.text.as_deref().unwrap_or_default();
        require_non_empty(label, "text", location)?;
        let raw = entry.link.as_deref().unwrap_or_default();
        let target = match classify_target(raw, self.options.clean_urls) {
            Ok(Target::Internal(route)) => NavTarget::Internal(route.path),
            Ok(Target::External(url)) => NavTarget::External(url.to_string()),
            Err(reason) => {
                return Err(ResolveError::InvalidTarget {
                    target: raw.to_owned(),
                    location: format!("{location} > {label}"),
                    reason: reason.to_owned(),
                });
            }
        };
        Ok(ResolvedNavEntry {
            label: label.to_owned(),
            target,
        })
    }
}

/// Classified sidebar item.
enum ItemKind<'a> {
    Page { link: &'a str },
    Group { items: &'a [SidebarItem] },
    Include { name: &'a str },
}

/// Depth-first sidebar walk state.
struct Walker<'a> {
    options: ResolveOptions,
    groups: &'a BTreeMap<String, SidebarItem>,
    routes: Vec<ResolvedRoute>,
    /// Route path to location of the node that declared it.
    declared_at: HashMap<String, String>,
    /// Names of groups currently being expanded, outermost first.
    ancestors: Vec<String>,
    warnings: Vec<ResolveWarning>,
}

impl<'a> Walker<'a> {
    fn new(options: ResolveOptions, groups: &'a BTreeMap<String, SidebarItem>) -> Self {
        Self {
            options,
            groups,
            routes: Vec::new(),
            declared_at: HashMap::new(),
            ancestors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn walk_items(
        &mut self,
        items: &[SidebarItem],
        section: &str,
        parent_location: &str,
        trail: &mut Vec<String>,
    ) -> Result<Vec<SidebarNode>, ResolveError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.walk_item(item, i, section, parent_location, trail))
            .collect()
    }

    fn walk_item(
        &mut self,
        item: &SidebarItem,
        index: usize,
        section: &str,
        parent_location: &str,
        trail: &mut Vec<String>,
    ) -> Result<SidebarNode, ResolveError> {
        let location = match item.text.as_deref() {
            Some(text) if !text.trim().is_empty() => format!("{parent_location} > {text}"),
            _ => format!("{parent_location} > #{index}"),
        };
        self.report_unknown_fields(&item.extra, &location);

        match classify_item(item, &location)? {
            ItemKind::Include { name } => {
                self.expand_include(item, name, section, parent_location, &location, trail)
            }
            ItemKind::Page { link } => {
                let label = require_label(item, &location)?;
                // Pages ignore the flag, but a malformed one is still reported.
                if let Some(value) = &item.collapsed {
                    self.coerce_flag(value, "collapsed", &location)?;
                }
                let path = self.register_route(link, label, section, &location, trail)?;
                Ok(SidebarNode::Page {
                    label: label.to_owned(),
                    path,
                })
            }
            ItemKind::Group { items } => {
                let label = require_label(item, &location)?;
                self.walk_group(item, label, items, section, &location, trail)
            }
        }
    }

    fn walk_group(
        &mut self,
        item: &SidebarItem,
        label: &str,
        items: &[SidebarItem],
        section: &str,
        location: &str,
        trail: &mut Vec<String>,
    ) -> Result<SidebarNode, ResolveError> {
        let collapsed_by_default = match &item.collapsed {
            Some(value) => self.coerce_flag(value, "collapsed", location)?,
            None => false,
        };

        let path = match item.link.as_deref() {
            Some(link) => Some(self.register_route(link, label, section, location, trail)?),
            None => None,
        };

        trail.push(label.to_owned());
        let children = self.walk_items(items, section, location, trail);
        trail.pop();

        Ok(SidebarNode::Group {
            label: label.to_owned(),
            path,
            collapsed_by_default,
            collapsible: item.collapsed.is_some(),
            children: children?,
        })
    }

    fn expand_include(
        &mut self,
        item: &SidebarItem,
        name: &str,
        section: &str,
        parent_location: &str,
        location: &str,
        trail: &mut Vec<String>,
    ) -> Result<SidebarNode, ResolveError> {
        if self.ancestors.iter().any(|ancestor| ancestor == name) {
            let mut chain = self.ancestors.clone();
            chain.push(name.to_owned());
            return Err(ResolveError::CycleDetected {
                chain,
                location: location.to_owned(),
            });
        }

        let groups = self.groups;
        let group = groups.get(name).ok_or_else(|| ResolveError::UnknownGroup {
            name: name.to_owned(),
            location: location.to_owned(),
        })?;

        // An include may override the label and collapsed state of the group it places.
        let mut placed = group.clone();
        if let Some(text) = item.text.as_ref().filter(|t| !t.trim().is_empty()) {
            placed.text = Some(text.clone());
        }
        if let Some(collapsed) = &item.collapsed {
            placed.collapsed = Some(collapsed.clone());
        }
        if placed.include.is_some() {
            return Err(ResolveError::InvalidItem {
                location: format!("groups[{name}]"),
                reason: "a named group cannot itself be an include".to_owned(),
            });
        }

        self.ancestors.push(name.to_owned());
        let node = self.walk_item(&placed, 0, section, parent_location, trail);
        self.ancestors.pop();
        node
    }

    /// Register an internal route and return its normalized path.
    fn register_route(
        &mut self,
        link: &str,
        label: &str,
        section: &str,
        location: &str,
        trail: &[String],
    ) -> Result<String, ResolveError> {
        let RoutePath { path, directory } = match classify_target(link, self.options.clean_urls) {
            Ok(Target::Internal(route)) => route,
            Ok(Target::External(_)) => {
                return Err(ResolveError::InvalidTarget {
                    target: link.to_owned(),
                    location: location.to_owned(),
                    reason: "sidebar pages must link to a route path".to_owned(),
                });
            }
            Err(reason) => {
                return Err(ResolveError::InvalidTarget {
                    target: link.to_owned(),
                    location: location.to_owned(),
                    reason: reason.to_owned(),
                });
            }
        };

        if let Some(first) = self.declared_at.get(&path) {
            return Err(ResolveError::DuplicateRoute {
                path,
                first: first.clone(),
                second: location.to_owned(),
            });
        }
        self.declared_at.insert(path.clone(), location.to_owned());

        let mut breadcrumb = trail.to_vec();
        breadcrumb.push(label.to_owned());
        self.routes.push(ResolvedRoute {
            path: path.clone(),
            label: label.to_owned(),
            breadcrumb,
            section: section.to_owned(),
            directory,
        });

        Ok(path)
    }

    fn report_unknown_fields(&mut self, extra: &BTreeMap<String, Value>, location: &str) {
        for field in extra.keys() {
            tracing::warn!(field = %field, location, "Ignoring unknown field");
            self.warnings.push(ResolveWarning::UnknownField {
                field: field.clone(),
                location: location.to_owned(),
            });
        }
    }

    /// Normalize a loosely-typed boolean flag.
    fn coerce_flag(
        &mut self,
        value: &Value,
        field: &str,
        location: &str,
    ) -> Result<bool, ResolveError> {
        let invalid = |found: String| ResolveError::InvalidFieldType {
            field: field.to_owned(),
            location: location.to_owned(),
            found,
        };

        match value {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) => {
                if self.options.strict_coercion {
                    return Err(invalid(format!("the string {text:?}")));
                }
                let coerced = parse_bool_text(text)
                    .ok_or_else(|| invalid(format!("the string {text:?}")))?;
                tracing::warn!(
                    field,
                    location,
                    value = %text,
                    coerced,
                    "Coerced string flag to boolean"
                );
                self.warnings.push(ResolveWarning::TypeCoercion {
                    field: field.to_owned(),
                    location: location.to_owned(),
                    value: text.clone(),
                    coerced,
                });
                Ok(coerced)
            }
            other => Err(invalid(value_kind(other).to_owned())),
        }
    }
}

/// Combine top-level theme settings with a nested `themeConfig` block.
fn merge_theme(description: &SiteDescription) -> Result<Cow<'_, ThemeConfig>, ResolveError> {
    let Some(nested) = &description.theme_config else {
        return Ok(Cow::Borrowed(&description.theme));
    };

    let mut theme = description.theme.clone();
    merge_field(&mut theme.nav, &nested.nav, |v| !v.is_empty(), "nav")?;
    merge_field(&mut theme.sidebar, &nested.sidebar, |v| !v.is_empty(), "sidebar")?;
    merge_field(
        &mut theme.social_links,
        &nested.social_links,
        |v| !v.is_empty(),
        "socialLinks",
    )?;
    merge_field(&mut theme.logo, &nested.logo, Option::is_some, "logo")?;
    merge_field(&mut theme.search, &nested.search, Option::is_some, "search")?;
    merge_field(&mut theme.footer, &nested.footer, Option::is_some, "footer")?;
    merge_field(&mut theme.edit_link, &nested.edit_link, Option::is_some, "editLink")?;
    merge_field(
        &mut theme.last_updated,
        &nested.last_updated,
        Option::is_some,
        "lastUpdated",
    )?;
    Ok(Cow::Owned(theme))
}

fn merge_field<T: Clone>(
    top: &mut T,
    nested: &T,
    is_set: impl Fn(&T) -> bool,
    field: &str,
) -> Result<(), ResolveError> {
    if !is_set(nested) {
        return Ok(());
    }
    if is_set(top) {
        return Err(ResolveError::ConflictingField {
            field: field.to_owned(),
            location: "themeConfig".to_owned(),
        });
    }
    top.clone_from(nested);
    Ok(())
}

fn classify_item<'i>(item: &'i SidebarItem, location: &str) -> Result<ItemKind<'i>, ResolveError> {
    let invalid = |reason: &str| ResolveError::InvalidItem {
        location: location.to_owned(),
        reason: reason.to_owned(),
    };

    if let Some(name) = item.include.as_deref() {
        if item.link.is_some() || item.items.is_some() {
            return Err(invalid("`include` cannot be combined with `link` or `items`"));
        }
        return Ok(ItemKind::Include { name });
    }

    match (item.link.as_deref(), item.items.as_deref()) {
        (_, Some(items)) if !items.is_empty() => Ok(ItemKind::Group { items }),
        (Some(link), _) => Ok(ItemKind::Page { link }),
        (None, Some(_)) => Err(invalid("group has no items and no link")),
        (None, None) => Err(invalid("item needs a `link`, `items` or `include`")),
    }
}

fn require_label<'i>(item: &'i SidebarItem, location: &str) -> Result<&'i str, ResolveError> {
    let label = item.text.as_deref().unwrap_or_default();
    require_non_empty(label, "text", location)?;
    Ok(label)
}

fn require_non_empty(value: &str, field: &str, location: &str) -> Result<(), ResolveError> {
    if value.trim().is_empty() {
        return Err(ResolveError::MissingField {
            field: field.to_owned(),
            location: location.to_owned(),
        });
    }
    Ok(())
}

fn validate_social_link(link: &SocialLink, index: usize) -> Result<SocialLink, ResolveError> {
    if link.link.trim().is_empty() {
        return Err(ResolveError::InvalidTarget {
            target: link.link.clone(),
            location: format!("socialLinks[{index}]"),
            reason: "target is empty".to_owned(),
        });
    }
    Ok(link.clone())
}

/// Parse the string encodings of booleans seen in hand-written configuration.
fn parse_bool_text(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
