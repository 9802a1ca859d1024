//! Core type definitions for class name groupings.

use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

/// A mapping from group key to class value.
///
/// Keys keep insertion order, which is the order class names are emitted in
/// when a mapping is flattened.
pub type Options = IndexMap<String, OptionValue>;

/// The flattened result: one space-joined class string per top-level key.
pub type Output = IndexMap<String, String>;

/// Why a value was not accepted as a class value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    /// Integer or floating point number (including NaN).
    Number,

    /// `null`, `~`, or a missing value.
    Null,

    /// A sequence holding anything other than strings.
    MixedList,

    /// Any other shape a loader could not map (aliases, bad values).
    Other,
}

impl UnsupportedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnsupportedKind::Number => "number",
            UnsupportedKind::Null => "null",
            UnsupportedKind::MixedList => "mixed list",
            UnsupportedKind::Other => "unknown value",
        }
    }
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value inside a class grouping.
///
/// Strings and string lists carry class names. Booleans are toggles that the
/// caller has already resolved and never contribute text. Nested mappings
/// group further values, and `Unsupported` records a shape that is tolerated
/// but ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// A resolved toggle. Contributes nothing when flattened.
    Bool(bool),

    /// One or more class names, used verbatim.
    Str(String),

    /// Class names in order.
    List(Vec<String>),

    /// A nested grouping, flattened in key order.
    Nested(Options),

    /// A value outside the accepted shapes.
    Unsupported(UnsupportedKind),
}

impl OptionValue {
    /// Check if this is a leaf value (string, string list, or boolean).
    ///
    /// Leaves are replaced wholesale by overrides; only nested mappings are
    /// merged key by key.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            OptionValue::Bool(_) | OptionValue::Str(_) | OptionValue::List(_)
        )
    }

    /// Check if this value counts as present when applying overrides.
    ///
    /// Absent values are `false`, the empty string, the empty list, and any
    /// unsupported value. Nested mappings are always present, even when empty.
    pub fn is_present(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Str(s) => !s.is_empty(),
            OptionValue::List(items) => !items.is_empty(),
            OptionValue::Nested(_) => true,
            OptionValue::Unsupported(_) => false,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, OptionValue::Nested(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Options> {
        match self {
            OptionValue::Nested(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Str(_) => "string",
            OptionValue::List(_) => "list",
            OptionValue::Nested(_) => "mapping",
            OptionValue::Unsupported(kind) => kind.as_str(),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(items: Vec<&str>) -> Self {
        OptionValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

impl From<Options> for OptionValue {
    fn from(map: Options) -> Self {
        OptionValue::Nested(map)
    }
}

/// Errors that abort a class group computation or a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassGroupError {
    /// Nesting exceeds the configured maximum depth.
    ///
    /// Raised instead of recursing without bound on pathological input.
    #[error("Class group nesting too deep (max depth: {max_depth}) at path: {}", path.join("."))]
    NestingTooDeep {
        /// Maximum allowed depth
        max_depth: usize,
        /// Path where the limit was exceeded
        path: Vec<String>,
    },

    #[error("Invalid YAML: {message}")]
    InvalidYaml { message: String },

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// The document root was not a mapping of group keys.
    #[error("Expected a mapping at the document root, found {found}")]
    NotAMapping { found: &'static str },
}
