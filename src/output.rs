//! Terminal output formatting for the pxsvg CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs.
//! All status output goes to stderr; stdout is reserved for exported documents.

use std::io::{self, IsTerminal, Write};

use crate::export::report::{Diagnostic, Severity};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "   Exporting hero.yaml frame 1 (16x16)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an export diagnostic, with its help text on a dim second line.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        let verb = diagnostic.severity.to_string();
        match diagnostic.severity {
            Severity::Info => self.info(&verb, &diagnostic.message),
            Severity::Warning => self.warning(&verb, &diagnostic.message),
        }
        if let Some(help) = &diagnostic.help {
            let line = format!("{:>VERB_WIDTH$} {}", "", self.dim(&format!("help: {}", help)));
            let _ = writeln!(io::stderr().lock(), "{}", line);
        }
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a string as cyan (for paths).
    pub fn cyan(&self, text: &str) -> String {
        if self.color {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "layer", "layers")` → "1 layer".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "layer", "layers"), "1 layer");
    }

    #[test]
    fn test_plural_zero() {
        assert_eq!(plural(0, "layer", "layers"), "0 layers");
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        let p = Path::new("/nonexistent/path/to/sprite.yaml");
        assert_eq!(display_path(p), "/nonexistent/path/to/sprite.yaml");
    }

    #[test]
    fn test_plain_formatting_without_colour() {
        let printer = Printer { color: false };
        assert_eq!(printer.dim("x"), "x");
        assert_eq!(printer.cyan("out.svg"), "out.svg");
    }
}
