//! Flattening of class values into space-joined strings.
//!
//! A value is walked depth-first. Strings and string lists contribute their
//! class names in order, nested mappings contribute the classes of each key in
//! iteration order, and booleans contribute nothing. Unsupported values are
//! skipped with a diagnostic.

use crate::diagnostic::Diagnostic;
use crate::types::{ClassGroupError, OptionValue};
use crate::walk::Walk;

/// Flatten the value of one top-level group into its class sequence.
///
/// The sequence is returned as-is, empty strings included; use
/// [`join_classes`] to produce the final class string. `max_depth` bounds the
/// key path length (top-level key included).
pub fn flatten_value<'a>(
    key: &str,
    value: &'a OptionValue,
    max_depth: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<&'a str>, ClassGroupError> {
    let mut walk = Walk::new(max_depth, diagnostics);
    let mut classes = Vec::new();
    walk.descend(key)?;
    collect(value, &mut classes, &mut walk)?;
    Ok(classes)
}

/// Join class names with a single space, dropping empty entries.
pub fn join_classes<S: AsRef<str>>(classes: &[S]) -> String {
    classes
        .iter()
        .map(AsRef::as_ref)
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect<'a>(
    value: &'a OptionValue,
    classes: &mut Vec<&'a str>,
    walk: &mut Walk<'_>,
) -> Result<(), ClassGroupError> {
    match value {
        OptionValue::Str(class) => classes.push(class),
        OptionValue::List(items) => classes.extend(items.iter().map(String::as_str)),
        OptionValue::Bool(_) => {}
        OptionValue::Nested(map) => {
            for (key, child) in map {
                walk.descend(key)?;
                collect(child, classes, walk)?;
                walk.ascend();
            }
        }
        OptionValue::Unsupported(kind) => walk.unsupported_value(*kind),
    }
    Ok(())
}
