//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as batched diagnostics whose public shape moves
//! between releases. We only rely on the `Debug` rendering and pull out the
//! parts a developer needs to fix their game: what kind of failure it was and
//! the message text.

use std::fmt;

/// Diagnostic kind (mirrors the Rolldown event kinds we care about).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    ParseError,
    UnresolvedEntry,
    UnresolvedImport,
    MissingExport,
    Transform,
    Other,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::UnresolvedEntry => "UnresolvedEntry",
            DiagnosticKind::UnresolvedImport => "UnresolvedImport",
            DiagnosticKind::MissingExport => "MissingExport",
            DiagnosticKind::Transform => "Transform",
            DiagnosticKind::Other => "Error",
        };
        f.write_str(name)
    }
}

/// A single compile failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl CompileDiagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for CompileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Extract diagnostics from Rolldown error types.
///
/// Batched errors carry one `message: "..."` field per diagnostic; each one
/// becomes its own [`CompileDiagnostic`]. Anything else is reported whole.
pub fn extract_from_rolldown_error(error: &dyn fmt::Debug) -> Vec<CompileDiagnostic> {
    let error_str = format!("{error:?}");

    let messages = quoted_fields(&error_str, "message: \"");
    if messages.is_empty() {
        return vec![CompileDiagnostic::new(classify(&error_str), error_str.trim())];
    }

    messages
        .into_iter()
        .map(|message| CompileDiagnostic::new(classify(&message), message))
        .collect()
}

fn classify(text: &str) -> DiagnosticKind {
    if text.contains("UnresolvedEntry") || text.contains("Cannot resolve entry") {
        DiagnosticKind::UnresolvedEntry
    } else if text.contains("UnresolvedImport")
        || text.contains("Could not resolve")
        || text.contains("Cannot resolve")
    {
        DiagnosticKind::UnresolvedImport
    } else if text.contains("MissingExport") || text.contains("is not exported") {
        DiagnosticKind::MissingExport
    } else if text.contains("Parse error")
        || text.contains("Unexpected token")
        || text.contains("Expected")
    {
        DiagnosticKind::ParseError
    } else if text.contains("Transform") || text.contains("transform") {
        DiagnosticKind::Transform
    } else {
        DiagnosticKind::Other
    }
}

/// Collect the string values following every `marker` in a Debug rendering,
/// unescaping `\"` and `\n`.
fn quoted_fields(text: &str, marker: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(marker) {
        rest = &rest[start + marker.len()..];
        let mut value = String::new();
        let mut chars = rest.char_indices();
        let mut end = rest.len();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, escaped)) => value.push(escaped),
                    None => {}
                },
                '"' => {
                    end = idx + 1;
                    break;
                }
                other => value.push(other),
            }
        }

        rest = &rest[end..];
        if !value.trim().is_empty() {
            fields.push(value);
        }
    }

    fields
}
