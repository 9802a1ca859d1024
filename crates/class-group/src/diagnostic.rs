//! Non-fatal diagnostics collected while merging and flattening.
//!
//! Values outside the accepted shapes never abort a computation. Instead a
//! [`Diagnostic`] is pushed onto a caller-supplied collector and a `tracing`
//! warning is emitted, so both programmatic callers and log readers see it.

use serde::Serialize;
use std::fmt;

/// An unsupported value was skipped while flattening.
pub const CODE_UNSUPPORTED_VALUE: &str = "CG-1-1";

/// An unsupported override could not replace an existing mapping.
pub const CODE_IGNORED_OVERRIDE: &str = "CG-1-2";

/// A warning produced while computing class groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable code identifying the kind of problem
    pub code: &'static str,

    /// Key path from the top-level group down to the offending value
    pub path: Vec<String>,

    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: &'static str, path: &[String], message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Dotted form of the key path (`container.sm.layout`).
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (at {})", self.code, self.message, self.dotted_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(
            CODE_UNSUPPORTED_VALUE,
            &["container".to_string(), "width".to_string()],
            "Ignored unsupported value (number)",
        );
        assert_eq!(
            diagnostic.to_string(),
            "[CG-1-1] Ignored unsupported value (number) (at container.width)"
        );
    }

    #[test]
    fn test_serialize() {
        let diagnostic = Diagnostic::new(CODE_IGNORED_OVERRIDE, &["k".to_string()], "skipped");
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["code"], "CG-1-2");
        assert_eq!(json["path"][0], "k");
    }
}
