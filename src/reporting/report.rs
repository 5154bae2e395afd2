//! # Report Model Module / 报告模型模块
//!
//! A `Report` is one block of output: a level that decides its color and a
//! list of lines made of styled spans. The engine hands reports to a
//! `ReportSink` and never prints on its own.
//!
//! `Report` 是一块输出：由级别决定颜色，由带样式片段组成的行构成。
//! 引擎把报告交给 `ReportSink`，自身从不直接打印。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Run banners such as the solution name (magenta).
    Message,
    /// Passed tests and an all-green summary (green).
    Info,
    Warning,
    /// Failed tests (red).
    Error,
    /// Per-invocation trace lines (blue).
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Bold,
    /// Bold and underlined.
    Label,
    Italic,
    ItalicBold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub style: Style,
    pub text: String,
}

impl Span {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Style::Plain, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: Level,
    pub lines: Vec<Vec<Span>>,
}

impl Report {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            lines: Vec::new(),
        }
    }

    /// Appends `text` in one style, one line per `\n`-separated part.
    pub fn line(mut self, style: Style, text: impl AsRef<str>) -> Self {
        for part in text.as_ref().split('\n') {
            self.lines.push(vec![Span::new(style, part)]);
        }
        self
    }

    pub fn text(self, text: impl AsRef<str>) -> Self {
        self.line(Style::Plain, text)
    }

    pub fn spans(mut self, spans: Vec<Span>) -> Self {
        self.lines.push(spans);
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(Vec::new());
        self
    }

    /// The report without any styling.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|spans| spans.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Receives every report the engine produces.
/// 接收引擎产生的每一份报告。
pub trait ReportSink {
    fn emit(&mut self, report: Report);

    fn message(&mut self, level: Level, text: &str) {
        self.emit(Report::new(level).text(text));
    }
}

/// Keeps reports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<Report>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports as plain text, separated by newlines.
    pub fn text(&self) -> String {
        self.reports
            .iter()
            .map(Report::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Report> {
        self.reports.iter().filter(move |r| r.level == level)
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, report: Report) {
        self.reports.push(report);
    }
}
