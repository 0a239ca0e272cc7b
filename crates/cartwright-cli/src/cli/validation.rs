use std::time::Duration;

use crate::config::MAX_INDENT_LEVEL;

/// Parse `--indent-level`.
pub fn parse_indent_level(s: &str) -> Result<u8, String> {
    let level: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number between 0 and {}", s, MAX_INDENT_LEVEL))?;

    if level > MAX_INDENT_LEVEL {
        return Err(format!(
            "Indent level {} is too large (maximum is {})",
            level, MAX_INDENT_LEVEL
        ));
    }

    Ok(level)
}

/// Parse `--debounce` as milliseconds.
pub fn parse_debounce(s: &str) -> Result<Duration, String> {
    let ms: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a duration in milliseconds", s))?;

    if ms > 10_000 {
        return Err("Debounce must be at most 10000ms".to_string());
    }

    Ok(Duration::from_millis(ms))
}
