//! Diagnostics collected while exporting.

use std::fmt;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

pub const LAYER_SKIPPED: &str = "pxsvg::export::layer-skipped";
pub const CEL_FALLBACK: &str = "pxsvg::export::cel-fallback";
pub const MALFORMED_PIXELS: &str = "pxsvg::export::malformed-pixels";
pub const CLAMPED_CHANNELS: &str = "pxsvg::export::clamped-channels";
pub const CLIPPED_PIXELS: &str = "pxsvg::export::clipped-pixels";
pub const STRATEGY_FALLBACK: &str = "pxsvg::export::strategy-fallback";
pub const EMPTY: &str = "pxsvg::export::empty";

/// A single export diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code, one of the constants in this module.
    pub code: &'static str,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn info(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
            help: None,
        }
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Everything noteworthy that happened during one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    diagnostics: Vec<Diagnostic>,
}

impl ExportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn info(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::info(code, message));
    }

    pub fn warning(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    /// Check whether any diagnostic carries the given code.
    pub fn contains(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
