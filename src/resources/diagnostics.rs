//! Diagnostics collection for resource loading.
//!
//! Loading is deliberately lenient: a malformed document fails that document
//! only, and an unresolvable entry name fails that entry only. Everything
//! that was skipped is reported here rather than silently absorbed, so a
//! caller can decide after the load whether the skips matter.
//!
//! The [`Diagnostics`] container uses `boxcar::Vec` for lock-free append,
//! allowing the parallel loaders to report without synchronization overhead.
//!
//! # Example
//!
//! ```rust,no_run
//! use rescope::diagnostics::{Diagnostics, DiagnosticCategory};
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.warning(
//!     DiagnosticCategory::Reference,
//!     "skipping entry 'missing_string': not registered",
//! );
//!
//! if diagnostics.has_any() {
//!     for entry in diagnostics.iter() {
//!         eprintln!("{}", entry);
//!     }
//! }
//! ```

use std::fmt;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    Info,

    /// A recoverable issue: an entry or document was skipped, the rest of
    /// the load pass continued normally.
    Warning,

    /// Invalid input that cost a whole document or directory.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Category of the diagnostic source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Document-level XML parse failures
    Xml,
    /// Names or references the identifier registry could not resolve
    Reference,
    /// Malformed typed values (colors, dimensions, attribute formats)
    Value,
    /// Directory listing or file read failures
    Io,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Xml => write!(f, "xml"),
            DiagnosticCategory::Reference => write!(f, "reference"),
            DiagnosticCategory::Value => write!(f, "value"),
            DiagnosticCategory::Io => write!(f, "io"),
        }
    }
}

/// An individual diagnostic entry.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity of the entry
    pub severity: DiagnosticSeverity,
    /// Category of the source that reported it
    pub category: DiagnosticCategory,
    /// Human-readable description including entry or file context
    pub message: String,
    /// Source path of the document or directory involved, when known
    pub path: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry without path context.
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity,
            category,
            message: message.into(),
            path: None,
        }
    }

    /// Adds source path information to the diagnostic.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)?;
        if let Some(path) = &self.path {
            write!(f, " ({})", path)?;
        }
        Ok(())
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append. Multiple
/// loader threads can add diagnostics simultaneously without coordination.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds an informational diagnostic.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message));
    }

    /// Adds a warning diagnostic.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            message,
        ));
    }

    /// Adds an error diagnostic.
    pub fn error(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Error,
            category,
            message,
        ));
    }

    /// Adds a diagnostic entry directly, e.g. one built with
    /// [`Diagnostic::with_path`].
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any warning-level diagnostics have been collected.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Warning)
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Iterates over all collected diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_and_counts() {
        let diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_any());

        diagnostics.info(DiagnosticCategory::Xml, "note");
        diagnostics.warning(DiagnosticCategory::Reference, "skipped entry");
        diagnostics.error(DiagnosticCategory::Io, "unreadable directory");

        assert!(diagnostics.has_any());
        assert!(diagnostics.has_warnings());
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.count(), 3);
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn display_includes_path() {
        let diagnostic = Diagnostic::new(
            DiagnosticSeverity::Warning,
            DiagnosticCategory::Xml,
            "bad document",
        )
        .with_path("values/strings.xml");

        assert_eq!(
            format!("{}", diagnostic),
            "[WARN] xml: bad document (values/strings.xml)"
        );
    }

    #[test]
    fn concurrent_append() {
        use std::sync::Arc;

        let diagnostics = Arc::new(Diagnostics::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let diagnostics = Arc::clone(&diagnostics);
            handles.push(std::thread::spawn(move || {
                diagnostics.warning(DiagnosticCategory::Value, format!("worker {i}"));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(diagnostics.count(), 8);
        assert_eq!(diagnostics.warning_count(), 8);
    }
}
