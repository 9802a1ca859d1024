//! Flatten nested class name groupings into one class string per slot.
//!
//! UI components often organize their class names by breakpoint, state or
//! concern. This crate turns such a grouping into a flat mapping from each
//! top-level key to a single space-joined class string, and lets callers
//! layer overrides on top of a shared base grouping before flattening.
//!
//! # Key Features
//!
//! - **Depth-first flattening**: strings and string lists are emitted in key
//!   order; booleans contribute nothing
//! - **Override layers**: later layers replace leaves and merge into mappings
//! - **Tolerant input**: numbers, nulls and mixed lists are ignored with a
//!   [`Diagnostic`] instead of failing
//! - **Bounded recursion**: nesting beyond [`EngineOptions::max_depth`] is an
//!   error rather than a stack overflow
//!
//! # Example
//!
//! ```rust
//! use class_group::{class_group, options_from_json_str};
//!
//! let collection = options_from_json_str(r#"{
//!     "container": {
//!         "layout": ["flex", "gap-2"],
//!         "presentation": "bg-white"
//!     }
//! }"#)?;
//! let overrides = options_from_json_str(r#"{
//!     "container": { "presentation": "bg-black" }
//! }"#)?;
//!
//! let output = class_group(&collection, &[overrides])?;
//! assert_eq!(output["container"], "flex gap-2 bg-black");
//! # Ok::<(), class_group::ClassGroupError>(())
//! ```

mod convert;
mod diagnostic;
mod engine;
pub mod flatten;
pub mod merge;
mod types;
mod walk;

pub use types::{ClassGroupError, OptionValue, Options, Output, UnsupportedKind};

pub use diagnostic::{CODE_IGNORED_OVERRIDE, CODE_UNSUPPORTED_VALUE, Diagnostic};

pub use engine::{ClassGroupEngine, EngineOptions};

pub use convert::{option_value_from_yaml, options_from_json_str, options_from_yaml_str};

/// Merge `overrides` into `collection` and flatten every top-level group.
///
/// Uses the default [`EngineOptions`]. Pass `&Options::new()` for an empty
/// collection and `&[]` for no overrides.
pub fn class_group(collection: &Options, overrides: &[Options]) -> Result<Output, ClassGroupError> {
    ClassGroupEngine::new().run(collection, overrides)
}
