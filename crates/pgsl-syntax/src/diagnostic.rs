//! Positioned messages and their rendering.
//!
//! Validation reports its findings as typed errors; this module turns them
//! into [`Diagnostic`]s and renders those as text, optionally underlining the
//! offending range of the PGSL source.

use crate::span::Span;
use std::fmt::{self, Write as _};

/// A message tied to a source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity
    pub level: DiagnosticLevel,
    /// Optional error code, e.g. `"V0003"`
    pub code: Option<String>,
    /// Primary message
    pub message: String,
    /// Source range
    pub span: Span,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related positions
    pub notes: Vec<DiagnosticNote>,
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    /// Blocks transpilation
    Error,
    /// Suspicious, does not block transpilation
    Warning,
    /// Additional information
    Note,
    /// Suggestion
    Help,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
            Self::Help => write!(f, "help"),
        }
    }
}

impl DiagnosticLevel {
    /// ANSI colour for this level.
    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
            Self::Note => "\x1b[36m",
            Self::Help => "\x1b[32m",
        }
    }

    /// ANSI reset sequence.
    #[must_use]
    pub const fn reset_code() -> &'static str {
        "\x1b[0m"
    }

    /// Level name, coloured when `use_colors` is set.
    #[must_use]
    pub fn format_colored(&self, use_colors: bool) -> String {
        if use_colors {
            format!("{}{}{}", self.color_code(), self, Self::reset_code())
        } else {
            self.to_string()
        }
    }
}

/// A secondary position attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticNote {
    /// Note message
    pub message: String,
    /// Source range
    pub span: Span,
}

/// Builder for [`Diagnostic`].
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Starts a diagnostic.
    #[must_use]
    pub fn new(level: DiagnosticLevel, message: impl Into<String>, span: Span) -> Self {
        Self {
            diagnostic: Diagnostic {
                level,
                code: None,
                message: message.into(),
                span,
                suggestions: Vec::new(),
                notes: Vec::new(),
            },
        }
    }

    /// Sets the error code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.diagnostic.code = Some(code.into());
        self
    }

    /// Adds a suggestion.
    #[must_use]
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.diagnostic.suggestions.push(suggestion.into());
        self
    }

    /// Adds a note.
    #[must_use]
    pub fn note(mut self, message: impl Into<String>, span: Span) -> Self {
        self.diagnostic.notes.push(DiagnosticNote {
            message: message.into(),
            span,
        });
        self
    }

    /// Finishes the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Renders diagnostics as text.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    use_colors: bool,
}

impl Emitter {
    /// Creates an emitter.
    #[must_use]
    pub const fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Renders one diagnostic. With `source`, the spanned lines are shown
    /// with the range underlined.
    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic, source: Option<&str>) -> String {
        let mut out = String::new();
        let span = diagnostic.span;

        let level = diagnostic.level.format_colored(self.use_colors);
        let _ = write!(out, "{}:{}: {level}", span.start_line, span.start_col);
        if let Some(code) = &diagnostic.code {
            let _ = write!(out, "[{code}]");
        }
        let _ = writeln!(out, ": {}", diagnostic.message);

        if let Some(source) = source {
            self.render_source(&mut out, diagnostic.level, span, source);
        }

        for suggestion in &diagnostic.suggestions {
            let help = DiagnosticLevel::Help.format_colored(self.use_colors);
            let _ = writeln!(out, "     = {help}: {suggestion}");
        }

        for note in &diagnostic.notes {
            let prefix = DiagnosticLevel::Note.format_colored(self.use_colors);
            let _ = writeln!(out, "     = {prefix} at {}: {}", note.span, note.message);
        }

        out
    }

    /// Renders several diagnostics, separated by blank lines.
    #[must_use]
    pub fn render_all(&self, diagnostics: &[Diagnostic], source: Option<&str>) -> String {
        diagnostics
            .iter()
            .map(|diagnostic| self.render(diagnostic, source))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_source(&self, out: &mut String, level: DiagnosticLevel, span: Span, source: &str) {
        let lines: Vec<&str> = source.lines().collect();
        if lines.is_empty() || span.start_line == 0 {
            return;
        }

        let first = (span.start_line - 1).min(lines.len() - 1);
        let last = span.end_line.saturating_sub(1).clamp(first, lines.len() - 1);

        for index in first..=last {
            let line = lines[index];
            let _ = writeln!(out, "{:4} | {line}", index + 1);

            let from = if index == first { span.start_col.max(1) } else { 1 };
            let to = if index == last { span.end_col } else { line.len() + 1 };
            let width = to.saturating_sub(from);
            if width == 0 {
                continue;
            }

            let marks = "^".repeat(width);
            let padding = " ".repeat(from - 1);
            if self.use_colors {
                let _ = writeln!(
                    out,
                    "     | {padding}{}{marks}{}",
                    level.color_code(),
                    DiagnosticLevel::reset_code()
                );
            } else {
                let _ = writeln!(out, "     | {padding}{marks}");
            }
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(false)
    }
}
