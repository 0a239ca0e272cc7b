use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::defaults::{default_cart, default_indent_level};

/// `tic` section: where the runtime lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicSection {
    /// TIC-80 executable. Without it, builds never launch the runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tic_executable: Option<PathBuf>,

    /// Directory TIC-80 saves carts to, used for backups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carts_directory: Option<PathBuf>,
}

/// `compression` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionSection {
    #[serde(default)]
    pub compress: bool,

    #[serde(default)]
    pub mangle: bool,

    #[serde(default = "default_indent_level")]
    pub indent_level: u8,

    /// Final game file handed to TIC-80
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed_file: Option<PathBuf>,
}

impl Default for CompressionSection {
    fn default() -> Self {
        Self {
            compress: false,
            mangle: false,
            indent_level: default_indent_level(),
            compressed_file: None,
        }
    }
}

/// `game` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Input device declared in a synthesized header (gamepad, mouse, keyboard)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Cartridge loaded before the code (sprites, map, sound)
    #[serde(default = "default_cart")]
    pub cart: String,

    /// Copy the cart back from TIC-80's carts directory after each session
    #[serde(default)]
    pub backup: bool,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            desc: None,
            input: None,
            cart: default_cart(),
            backup: false,
        }
    }
}
