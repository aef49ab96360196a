//! Resolution errors and warnings.

use std::fmt;

use serde::Serialize;

/// Fatal error that aborts resolution.
///
/// Every variant carries the location of the offending node, written as a
/// breadcrumb such as `sidebar[/] > Hashing > MD5`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Required field absent or empty.
    #[error("{location}: missing required field `{field}`")]
    MissingField { field: String, location: String },

    /// Link target is empty, malformed, or of the wrong kind.
    #[error("{location}: invalid target `{target}`: {reason}")]
    InvalidTarget {
        target: String,
        location: String,
        reason: String,
    },

    /// Two nodes resolve to the same route path.
    #[error("duplicate route `{path}`: declared at {first} and again at {second}")]
    DuplicateRoute {
        path: String,
        first: String,
        second: String,
    },

    /// A group includes itself, directly or transitively.
    ///
    /// `location` is the `include` item that closes the cycle.
    #[error("{location}: sidebar cycle detected: {}", .chain.join(" -> "))]
    CycleDetected { chain: Vec<String>, location: String },

    /// Field has a type that cannot be coerced.
    #[error("{location}: field `{field}` expected a boolean, found {found}")]
    InvalidFieldType {
        field: String,
        location: String,
        found: String,
    },

    /// `include` names a group that is not declared.
    #[error("{location}: unknown group `{name}`")]
    UnknownGroup { name: String, location: String },

    /// Item is not a page, a group or an include.
    #[error("{location}: invalid sidebar item: {reason}")]
    InvalidItem { location: String, reason: String },

    /// Field set both at the top level and inside `themeConfig`.
    #[error("{location}: `{field}` is also declared at the top level")]
    ConflictingField { field: String, location: String },
}

/// Non-fatal finding collected during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// A field had an unexpected but coercible type.
    TypeCoercion {
        field: String,
        location: String,
        value: String,
        coerced: bool,
    },
    /// A key that the site description does not define was ignored.
    UnknownField { field: String, location: String },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeCoercion {
                field,
                location,
                value,
                coerced,
            } => write!(
                f,
                "{location}: `{field}` is the string {value:?}, treated as {coerced}"
            ),
            Self::UnknownField { field, location } => {
                write!(f, "{location}: unknown field `{field}` ignored")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_route_message() {
        let err = ResolveError::DuplicateRoute {
            path: "/history/intro".to_owned(),
            first: "sidebar[/] > History > History".to_owned(),
            second: "sidebar[/] > Intro".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate route `/history/intro`: declared at sidebar[/] > History > History and again at sidebar[/] > Intro"
        );
    }

    #[test]
    fn test_cycle_message() {
        let err = ResolveError::CycleDetected {
            chain: vec!["a".to_owned(), "b".to_owned(), "a".to_owned()],
            location: "sidebar[/] > A > B > #0".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "sidebar[/] > A > B > #0: sidebar cycle detected: a -> b -> a"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = ResolveWarning::TypeCoercion {
            field: "collapsed".to_owned(),
            location: "sidebar[/] > Hashing".to_owned(),
            value: "True".to_owned(),
            coerced: true,
        };
        assert_eq!(
            warning.to_string(),
            "sidebar[/] > Hashing: `collapsed` is the string \"True\", treated as true"
        );
    }

    #[test]
    fn test_unknown_field_display() {
        let warning = ResolveWarning::UnknownField {
            field: "colapsed".to_owned(),
            location: "sidebar[/] > Hashing".to_owned(),
        };
        assert_eq!(
            warning.to_string(),
            "sidebar[/] > Hashing: unknown field `colapsed` ignored"
        );
    }
}
