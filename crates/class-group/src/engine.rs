//! The class group engine: merge overrides, then flatten every group.

use crate::diagnostic::Diagnostic;
use crate::flatten::{flatten_value, join_classes};
use crate::merge::apply_overrides;
use crate::types::{ClassGroupError, Options, Output};
use std::borrow::Cow;

/// Options for a class group computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum key path length, top-level key included (default: 256).
    ///
    /// Merging and flattening fail with `ClassGroupError::NestingTooDeep`
    /// when a grouping nests deeper than this.
    pub max_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Flattens class groupings, optionally applying override layers first.
///
/// The engine holds only its options, so one instance can be shared freely
/// between threads and reused across calls.
#[derive(Debug, Clone, Default)]
pub struct ClassGroupEngine {
    options: EngineOptions,
}

impl ClassGroupEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Merge `overrides` into `collection` and flatten each top-level group.
    ///
    /// Warnings about ignored values are logged and then dropped; use
    /// [`ClassGroupEngine::run_with_diagnostics`] to inspect them.
    pub fn run(
        &self,
        collection: &Options,
        overrides: &[Options],
    ) -> Result<Output, ClassGroupError> {
        let mut diagnostics = Vec::new();
        self.run_with_diagnostics(collection, overrides, &mut diagnostics)
    }

    /// Like [`ClassGroupEngine::run`], collecting warnings into `diagnostics`.
    ///
    /// Neither `collection` nor `overrides` is modified. Every key of the merged
    /// grouping gets an entry in the output, possibly the empty string.
    pub fn run_with_diagnostics(
        &self,
        collection: &Options,
        overrides: &[Options],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Output, ClassGroupError> {
        tracing::debug!(
            keys = collection.len(),
            overrides = overrides.len(),
            "Computing class groups"
        );

        let merged = if overrides.is_empty() {
            Cow::Borrowed(collection)
        } else {
            Cow::Owned(apply_overrides(
                collection,
                overrides,
                self.options.max_depth,
                diagnostics,
            )?)
        };

        let mut output = Output::with_capacity(merged.len());
        for (key, value) in merged.iter() {
            let classes = flatten_value(key, value, self.options.max_depth, diagnostics)?;
            output.insert(key.clone(), join_classes(&classes));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionValue, UnsupportedKind};

    fn options(entries: Vec<(&str, OptionValue)>) -> Options {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_default_options() {
        assert_eq!(EngineOptions::default().max_depth, 256);
        assert_eq!(ClassGroupEngine::new().options().max_depth, 256);
    }

    #[test]
    fn test_every_key_has_output() {
        let collection = options(vec![
            ("text", "a".into()),
            ("toggle", true.into()),
            ("number", OptionValue::Unsupported(UnsupportedKind::Number)),
            ("empty", OptionValue::Nested(Options::new())),
        ]);

        let output = ClassGroupEngine::new().run(&collection, &[]).unwrap();

        assert_eq!(output.len(), 4);
        assert_eq!(output["text"], "a");
        assert_eq!(output["toggle"], "");
        assert_eq!(output["number"], "");
        assert_eq!(output["empty"], "");
    }

    #[test]
    fn test_diagnostics_collected() {
        let collection = options(vec![
            ("number", OptionValue::Unsupported(UnsupportedKind::Number)),
            ("null", OptionValue::Unsupported(UnsupportedKind::Null)),
        ]);

        let mut diagnostics = Vec::new();
        ClassGroupEngine::new()
            .run_with_diagnostics(&collection, &[], &mut diagnostics)
            .unwrap();

        let paths: Vec<String> = diagnostics.iter().map(Diagnostic::dotted_path).collect();
        assert_eq!(paths, vec!["number", "null"]);
    }

    #[test]
    fn test_custom_depth_limit() {
        let collection = options(vec![(
            "k",
            OptionValue::Nested(options(vec![("x", "a".into())])),
        )]);

        let shallow = ClassGroupEngine::with_options(EngineOptions { max_depth: 1 });
        assert!(matches!(
            shallow.run(&collection, &[]),
            Err(ClassGroupError::NestingTooDeep { max_depth: 1, .. })
        ));

        let deep = ClassGroupEngine::with_options(EngineOptions { max_depth: 2 });
        assert_eq!(deep.run(&collection, &[]).unwrap()["k"], "a");
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassGroupEngine>();
    }
}
