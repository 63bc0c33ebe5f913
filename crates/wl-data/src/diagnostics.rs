use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The data cannot be used as-is.
    Error,
    /// The data was loaded, possibly with defaults filled in.
    Warning,
}

/// A problem found in a data file.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// File name within the data directory, e.g. `locations.txt`.
    pub file: String,
    /// 1-based line number; 0 for problems with the file as a whole.
    pub line: usize,
    /// Byte range within the file.
    pub span: Range<usize>,
    /// What went wrong.
    pub message: String,
    /// Optional text attached to the span when rendered.
    pub label: Option<String>,
}

impl Diagnostic {
    /// Create a warning for a span of `file`.
    pub fn warning(file: impl Into<String>, span: Range<usize>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, file, span, message)
    }

    /// Create a diagnostic with an explicit severity.
    pub fn new(
        severity: Severity,
        file: impl Into<String>,
        span: Range<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            file: file.into(),
            line: 0,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach the 1-based line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Attach a label shown next to the span.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.line > 0 {
            write!(f, "{prefix}: {}:{}: {}", self.file, self.line, self.message)
        } else {
            write!(f, "{prefix}: {}: {}", self.file, self.message)
        }
    }
}

impl Severity {
    fn style(self) -> (ReportKind<'static>, Color) {
        match self {
            Self::Error => (ReportKind::Error, Color::Red),
            Self::Warning => (ReportKind::Warning, Color::Yellow),
        }
    }
}

/// Render diagnostics for one file using ariadne.
///
/// Spans are byte offsets, as produced by the record parsers.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let config = Config::default().with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(source));
    let mut output = Vec::new();

    for diag in diagnostics {
        let (kind, color) = diag.severity.style();
        let label = Label::new((filename, diag.span.clone()))
            .with_message(diag.label.as_deref().unwrap_or(&diag.message))
            .with_color(color);

        let written = Report::build(kind, (filename, diag.span.clone()))
            .with_config(config)
            .with_message(&diag.message)
            .with_label(label)
            .finish()
            .write(&mut cache, &mut output);
        if let Err(e) = written {
            tracing::warn!(file = filename, error = %e, "cannot render diagnostic");
        }
    }

    String::from_utf8_lossy(&output).into_owned()
}
