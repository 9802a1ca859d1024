//! Applying override layers onto a base grouping.
//!
//! Overrides are applied left to right onto a fresh copy of the base, so the
//! caller's structures are never touched. For each key of an override:
//!
//! - an absent existing value (missing, `false`, `""`, empty list, unsupported)
//!   is replaced wholesale;
//! - an existing leaf (string, list, boolean) is replaced wholesale;
//! - an existing mapping is replaced wholesale by a leaf override;
//! - two mappings are merged key by key with the same rules.
//!
//! Later layers win at every path, and keys missing from the base are added.

use crate::diagnostic::Diagnostic;
use crate::types::{ClassGroupError, OptionValue, Options};
use crate::walk::Walk;

/// Apply `overrides` in order onto a copy of `base`.
///
/// `max_depth` bounds the key path length followed while merging mappings.
pub fn apply_overrides(
    base: &Options,
    overrides: &[Options],
    max_depth: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Options, ClassGroupError> {
    let mut merged = base.clone();
    let mut walk = Walk::new(max_depth, diagnostics);

    for (layer, override_layer) in overrides.iter().enumerate() {
        tracing::trace!(layer, keys = override_layer.len(), "Applying override layer");
        merge_options(&mut merged, override_layer, &mut walk)?;
    }

    Ok(merged)
}

fn merge_options(
    target: &mut Options,
    source: &Options,
    walk: &mut Walk<'_>,
) -> Result<(), ClassGroupError> {
    for (key, value) in source {
        walk.descend(key)?;
        match target.get_mut(key) {
            Some(existing) if existing.is_present() => merge_value(existing, value, walk)?,
            Some(existing) => *existing = value.clone(),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
        walk.ascend();
    }
    Ok(())
}

fn merge_value(
    existing: &mut OptionValue,
    value: &OptionValue,
    walk: &mut Walk<'_>,
) -> Result<(), ClassGroupError> {
    if existing.is_leaf() || value.is_leaf() {
        *existing = value.clone();
        return Ok(());
    }

    match (existing, value) {
        (OptionValue::Nested(target), OptionValue::Nested(source)) => {
            merge_options(target, source, walk)
        }
        (_, OptionValue::Unsupported(kind)) => {
            walk.ignored_override(*kind);
            Ok(())
        }
        // Only reached for an unsupported existing value, which is never present.
        (existing, value) => {
            *existing = value.clone();
            Ok(())
        }
    }
}
