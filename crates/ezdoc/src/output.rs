//! Colored terminal output.
//!
//! Status messages go to stderr; command results meant for piping go to stdout.

use console::{Style, Term};

#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Heading,
    Muted,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Heading => Style::new().cyan().bold(),
            Self::Muted => Style::new().dim(),
        }
    }
}

/// Terminal writer for command status and results.
pub(crate) struct Output {
    status: Term,
    results: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
        }
    }

    fn status(&self, tone: Tone, msg: &str) {
        // Write failures (closed pipe) are not worth aborting a command over.
        let _ = self
            .status
            .write_line(&tone.style().apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status(Tone::Success, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status(Tone::Warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status(Tone::Error, msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.status(Tone::Heading, msg);
    }

    /// Low-priority detail, dimmed.
    pub(crate) fn note(&self, msg: &str) {
        self.status(Tone::Muted, msg);
    }

    /// Write one result line to stdout, unstyled.
    pub(crate) fn data(&self, line: &str) {
        let _ = self.results.write_line(line);
    }
}
