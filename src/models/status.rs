use std::fmt;

const RESET: &str = "\x1b[0m";

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// ANSI foreground color code
    pub fn color(self) -> u8 {
        match self {
            Severity::Success => 32,
            Severity::Error => 31,
            Severity::Info => 34,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Error => "Error",
            Severity::Info => "Info",
        }
    }
}

/// One colorized report line: `<label>: <message> [<STATUS-WORD>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    severity: Severity,
    text: String,
}

impl StatusLine {
    /// Build a line for the command `cmd` acting on `message`.
    /// `label` replaces the severity's default status word when given.
    pub fn new(cmd: &str, message: &str, severity: Severity, label: Option<&str>) -> Self {
        let word = label.unwrap_or(severity.label());
        let text = format!(
            "{} \x1b[{}m[{}]{RESET}",
            format_command(cmd, message),
            severity.color(),
            word
        );

        Self { severity, text }
    }

    pub fn success(cmd: &str, message: &str) -> Self {
        Self::new(cmd, message, Severity::Success, None)
    }

    pub fn error(cmd: &str, message: &str) -> Self {
        Self::new(cmd, message, Severity::Error, None)
    }

    pub fn info(cmd: &str, message: &str, label: &str) -> Self {
        Self::new(cmd, message, Severity::Info, Some(label))
    }

    /// White-on-blue heading printed at the top of each report
    pub fn banner(title: &str) -> Self {
        Self {
            severity: Severity::Info,
            text: format!("\x1b[44m\x1b[37m{title}{RESET}"),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Bold blue `<cmd>: ` prefix followed by the plain message
fn format_command(cmd: &str, message: &str) -> String {
    format!("\x1b[1m\x1b[34m{cmd}: {RESET}{message}")
}

/// Ordered lines collected during one chunk's run, printed once
#[derive(Debug, Clone, Default)]
pub struct StatusBuffer {
    lines: Vec<StatusLine>,
}

impl StatusBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: StatusLine) {
        self.lines.push(line);
    }

    pub fn extend<I: IntoIterator<Item = StatusLine>>(&mut self, lines: I) {
        self.lines.extend(lines);
    }

    /// All lines joined by newlines
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(StatusLine::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print the buffer to stdout in one write and hand back its lines
    pub fn flush(self) -> Vec<StatusLine> {
        if !self.lines.is_empty() {
            println!("{}", self.render());
        }
        self.lines
    }
}
