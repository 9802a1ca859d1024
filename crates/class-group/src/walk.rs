//! Path and depth bookkeeping shared by the merger and the flattener.

use crate::diagnostic::{CODE_IGNORED_OVERRIDE, CODE_UNSUPPORTED_VALUE, Diagnostic};
use crate::types::{ClassGroupError, UnsupportedKind};

/// Tracks the key path of a recursive walk and enforces the depth limit.
///
/// The path always includes the top-level group key, so a walk over
/// `{container: {sm: "..."}}` reaches depth 2 at `container.sm`.
pub(crate) struct Walk<'d> {
    max_depth: usize,
    path: Vec<String>,
    diagnostics: &'d mut Vec<Diagnostic>,
}

impl<'d> Walk<'d> {
    pub(crate) fn new(max_depth: usize, diagnostics: &'d mut Vec<Diagnostic>) -> Self {
        Walk {
            max_depth,
            path: Vec::new(),
            diagnostics,
        }
    }

    /// Step into `key`, failing once the path is longer than the limit.
    pub(crate) fn descend(&mut self, key: &str) -> Result<(), ClassGroupError> {
        self.path.push(key.to_string());
        if self.path.len() > self.max_depth {
            return Err(ClassGroupError::NestingTooDeep {
                max_depth: self.max_depth,
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.path.pop();
    }

    pub(crate) fn unsupported_value(&mut self, kind: UnsupportedKind) {
        let dotted = self.path.join(".");
        tracing::warn!(path = %dotted, kind = %kind, "Ignoring unsupported class value");
        self.diagnostics.push(Diagnostic::new(
            CODE_UNSUPPORTED_VALUE,
            &self.path,
            format!("Ignored unsupported value ({})", kind),
        ));
    }

    pub(crate) fn ignored_override(&mut self, kind: UnsupportedKind) {
        let dotted = self.path.join(".");
        tracing::warn!(path = %dotted, kind = %kind, "Ignoring unsupported override of a mapping");
        self.diagnostics.push(Diagnostic::new(
            CODE_IGNORED_OVERRIDE,
            &self.path,
            format!("Unsupported override ({}) cannot replace a mapping", kind),
        ));
    }
}
