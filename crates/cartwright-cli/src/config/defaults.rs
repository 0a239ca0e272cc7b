pub fn default_indent_level() -> u8 {
    2
}

pub fn default_cart() -> String {
    "game.js".to_string()
}

/// Indentation widths above this are rejected.
pub const MAX_INDENT_LEVEL: u8 = 8;
