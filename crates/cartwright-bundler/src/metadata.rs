//! Metadata header extraction.
//!
//! TIC-80 reads cartridge metadata from leading comment lines of the form
//! `// key: value`. Bundling and minification drop comments, so the header is
//! pulled out of the entry source up front and prepended to the final game
//! file.

use crate::config::GameInfo;

/// Keys the runtime recognises in a metadata comment.
pub const METADATA_KEYS: [&str; 9] = [
    "title", "author", "desc", "site", "license", "version", "script", "input", "saveid",
];

/// Returns true when `line` is exactly `// <key>:...` for a whitelisted key.
///
/// Matching is case-sensitive and position-sensitive: no leading whitespace,
/// one space after the slashes, the colon directly after the key.
pub fn is_metadata_line(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("// ") else {
        return false;
    };
    METADATA_KEYS.iter().any(|key| {
        rest.strip_prefix(key)
            .is_some_and(|after| after.starts_with(':'))
    })
}

/// Ordered metadata lines, without trailing newlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataHeader {
    lines: Vec<String>,
}

impl MetadataHeader {
    /// Keep every metadata line of `source`, in source order, duplicates
    /// included. Lines may appear anywhere in the file.
    pub fn extract(source: &str) -> Self {
        let lines = source
            .lines()
            .filter(|line| is_metadata_line(line))
            .map(str::to_owned)
            .collect();
        Self { lines }
    }

    /// Build a header from config-provided game info.
    ///
    /// Used when the entry carries no metadata of its own. Always declares the
    /// script language since the game file is JavaScript.
    pub fn from_game(game: &GameInfo) -> Self {
        if game.is_empty() {
            return Self::default();
        }

        let fields = [
            ("title", game.title.as_deref()),
            ("author", game.author.as_deref()),
            ("desc", game.desc.as_deref()),
            ("script", Some("js")),
            ("input", game.input.as_deref()),
        ];

        let lines = fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("// {key}: {v}")))
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Header text as it appears at the top of the game file: each line
    /// followed by `\n`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
