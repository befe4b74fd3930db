//! Error types and diagnostics
//!
//! Only the final write of the JSON document is allowed to fail a run.
//! Everything upstream degrades to "fewer entries" and reports why through
//! [`Diagnostic`]s collected by the assembler.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for apidoc-etch operations
pub type EtchResult<T> = Result<T, EtchError>;

/// Main error type for apidoc-etch
#[derive(Debug, Error)]
pub enum EtchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TypeScript parse error
    #[error("TypeScript parse error in {file}: {message}")]
    TypeScriptParse { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML deserialization error
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl EtchError {
    /// Create a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        EtchError::TypeScriptParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        EtchError::Config(message.into())
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        EtchError::Other(message.into())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error - the entity contributes nothing
    Error,
    /// Warning - extraction continues with less data
    Warning,
    /// Info - informational message
    Info,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Source file, relative to the types root
    pub file: Option<PathBuf>,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (0-indexed)
    pub col: Option<usize>,
    /// Diagnostic code (for categorization)
    pub code: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: None,
            line: None,
            col: None,
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Info, message)
    }

    /// Set the source file
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the location
    pub fn at(mut self, line: usize, col: usize) -> Self {
        self.line = Some(line);
        self.col = Some(col);
        self
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = String::new();

        if let Some(ref file) = self.file {
            result.push_str(&file.display().to_string());
            if let Some(line) = self.line {
                result.push(':');
                result.push_str(&line.to_string());
                if let Some(col) = self.col {
                    result.push(':');
                    result.push_str(&col.to_string());
                }
            }
            result.push_str(": ");
        }

        result.push_str(self.severity.display());

        if let Some(ref code) = self.code {
            result.push('[');
            result.push_str(code);
            result.push(']');
        }

        result.push_str(": ");
        result.push_str(&self.message);

        result
    }

    /// Forward the diagnostic to the tracing subscriber
    pub fn emit(&self) {
        match self.severity {
            DiagnosticSeverity::Error => tracing::error!("{}", self.format()),
            DiagnosticSeverity::Warning => tracing::warn!("{}", self.format()),
            DiagnosticSeverity::Info => tracing::debug!("{}", self.format()),
        }
    }
}

/// Collector for diagnostics during a run
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, emitting it through `tracing` as it arrives
    pub fn add(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    /// Add an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::error(message));
    }

    /// Add a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::warning(message));
    }

    /// Add an info message
    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::info(message));
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Take ownership of the collected diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etch_error() {
        let err = EtchError::parse("core/editor.d.ts", "no tree produced");
        assert!(err.to_string().contains("core/editor.d.ts"));
        assert!(err.to_string().contains("no tree produced"));
    }

    #[test]
    fn test_diagnostic() {
        let diag = Diagnostic::warning("member name is not valid UTF-8")
            .in_file("core/class/selection.d.ts")
            .at(10, 5)
            .with_code("member");

        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert!(diag.format().contains("core/class/selection.d.ts:10:5"));
        assert!(diag.format().contains("warning[member]"));
    }

    #[test]
    fn test_diagnostics_collector() {
        let mut collector = DiagnosticsCollector::new();
        collector.error("error 1");
        collector.warning("warning 1");
        collector.info("info 1");

        assert!(collector.has_errors());
        assert_eq!(collector.error_count(), 1);
        assert_eq!(collector.warning_count(), 1);
        assert_eq!(collector.diagnostics().len(), 3);
    }
}
