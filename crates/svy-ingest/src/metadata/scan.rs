//! Line classification for the survey label language.
//!
//! The language is line-oriented with three statement kinds:
//!
//! ```text
//! value sex ;
//!   1 = 'Female'
//!   2 = 'Male'
//! ;
//! label sex = 'Respondent sex'
//! format sex SexFmt.;
//! format media_1 Multi_media.;
//! ```
//!
//! Value blocks are scoped by a lone `;` line, so a single forward pass with
//! one piece of block state is enough. The state is threaded explicitly as
//! [`ScanState`] rather than hidden in globals. Lines that resemble a
//! statement but fail its detailed pattern are collected as diagnostics and
//! skipped; nothing in the language aborts the scan.

use std::fmt;

/// One classified statement, tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `<code> = '<text>'` inside an open `value <var>` block.
    ValueEntry {
        variable: String,
        code: u32,
        text: String,
        line_no: usize,
    },
    /// `label <var> = '<text>'`.
    Label {
        variable: String,
        text: String,
        line_no: usize,
    },
    /// `format <var> <FormatName>.;`.
    Format {
        variable: String,
        format: String,
        line_no: usize,
    },
}

/// Why a line (or a declaration inside one) was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `value` keyword without a subject variable.
    MalformedValueBlock,
    /// A line inside a value block that is not `<int> = '<text>'`.
    MalformedValueEntry,
    /// A `label` line that is not `label <identifier> = '<text>'`.
    MalformedLabel,
    /// A `format` line with fewer than three tokens.
    MalformedFormat,
    /// A multi-group subvariable whose name has no positive numeric suffix.
    MissingSubvariableCode,
    /// A label for a variable that is neither Single nor any group's
    /// subvariable.
    UnknownLabelTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MalformedValueBlock => "malformed value block",
            Self::MalformedValueEntry => "malformed value entry",
            Self::MalformedLabel => "malformed label",
            Self::MalformedFormat => "malformed format",
            Self::MissingSubvariableCode => "subvariable without numeric suffix",
            Self::UnknownLabelTarget => "label for undeclared variable",
        };
        f.write_str(text)
    }
}

/// A skipped declaration, kept so callers and tests can see what best-effort
/// parsing dropped without changing load behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub line_no: usize,
    pub reason: SkipReason,
    pub detail: String,
}

impl ScanDiagnostic {
    pub(crate) fn new(line_no: usize, reason: SkipReason, detail: impl Into<String>) -> Self {
        Self {
            line_no,
            reason,
            detail: detail.into(),
        }
    }
}

/// Block state of the forward scan.
enum ScanState {
    Idle,
    InValueBlock(String),
}

/// Classifies every line of a metadata file in one forward pass.
pub fn scan_statements(text: &str) -> (Vec<Statement>, Vec<ScanDiagnostic>) {
    let mut statements = Vec::new();
    let mut diagnostics = Vec::new();
    let mut state = ScanState::Idle;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == ";" {
            state = ScanState::Idle;
            continue;
        }
        if let Some(rest) = keyword_rest(line, "value") {
            match rest.split_whitespace().next() {
                Some(variable) => state = ScanState::InValueBlock(variable.to_string()),
                None => diagnostics.push(ScanDiagnostic::new(
                    line_no,
                    SkipReason::MalformedValueBlock,
                    line,
                )),
            }
            continue;
        }
        if let ScanState::InValueBlock(variable) = &state
            && line.contains('=')
        {
            match parse_value_entry(line) {
                Some((code, text)) => statements.push(Statement::ValueEntry {
                    variable: variable.clone(),
                    code,
                    text,
                    line_no,
                }),
                None => diagnostics.push(ScanDiagnostic::new(
                    line_no,
                    SkipReason::MalformedValueEntry,
                    line,
                )),
            }
            continue;
        }
        if let Some(rest) = keyword_rest(line, "label") {
            match parse_label(rest) {
                Some((variable, text)) => statements.push(Statement::Label {
                    variable,
                    text,
                    line_no,
                }),
                None => {
                    diagnostics.push(ScanDiagnostic::new(line_no, SkipReason::MalformedLabel, line));
                }
            }
            continue;
        }
        if keyword_rest(line, "format").is_some() {
            let mut tokens = line.split_whitespace();
            let _keyword = tokens.next();
            match (tokens.next(), tokens.next()) {
                (Some(variable), Some(format)) => statements.push(Statement::Format {
                    variable: variable.to_string(),
                    format: format
                        .trim_end_matches(|c| c == '.' || c == ';')
                        .to_string(),
                    line_no,
                }),
                _ => diagnostics.push(ScanDiagnostic::new(
                    line_no,
                    SkipReason::MalformedFormat,
                    line,
                )),
            }
        }
        // Anything else is commentary or noise; pass over silently.
    }

    (statements, diagnostics)
}

/// Returns the text after `keyword` when the line starts with it at a word
/// boundary.
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Parses `<integer> = '<text>'`, tolerating trailing characters after the
/// closing quote.
fn parse_value_entry(line: &str) -> Option<(u32, String)> {
    let (lhs, rhs) = line.split_once('=')?;
    let code = lhs.trim().parse::<u32>().ok()?;
    let text = quoted_text(rhs.trim())?;
    Some((code, text))
}

/// Parses the remainder of `label <identifier> = '<text>'`.
fn parse_label(rest: &str) -> Option<(String, String)> {
    let (lhs, rhs) = rest.split_once('=')?;
    let variable = lhs.trim();
    if variable.is_empty() || !is_identifier(variable) {
        return None;
    }
    let text = quoted_text(rhs.trim())?;
    Some((variable.to_string(), text))
}

/// Extracts the text between the first pair of single quotes.
fn quoted_text(s: &str) -> Option<String> {
    let rest = s.strip_prefix('\'')?;
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
