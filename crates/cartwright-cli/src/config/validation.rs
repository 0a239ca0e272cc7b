use crate::config::{CartConfig, MAX_INDENT_LEVEL};
use crate::error::{ConfigError, Result};
use std::path::PathBuf;

fn is_blank(path: Option<&PathBuf>) -> bool {
    path.map_or(true, |p| p.as_os_str().is_empty())
}

fn missing(field: &str, example: &str) -> crate::error::CliError {
    ConfigError::MissingField {
        field: field.to_string(),
        hint: format!("Add {} to cartwright.config.json", example),
    }
    .into()
}

impl CartConfig {
    /// Validate configuration for logical consistency.
    ///
    /// Required keys are checked first, in file order, so the message names
    /// the first one a user has to add.
    pub fn validate(&self) -> Result<()> {
        if is_blank(self.entry.as_ref()) {
            return Err(missing("entry", "\"entry\": \"src/main.ts\""));
        }

        if is_blank(self.outfile.as_ref()) {
            return Err(missing("outfile", "\"outfile\": \"build/bundle.js\""));
        }

        if is_blank(self.compression.compressed_file.as_ref()) {
            return Err(missing(
                "compression.compressedFile",
                "\"compression\": { \"compressedFile\": \"build/game.js\" }",
            ));
        }

        if self.outfile == self.compression.compressed_file {
            return Err(ConfigError::InvalidValue {
                field: "compression.compressedFile".to_string(),
                value: self
                    .outfile
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                hint: "The game file must differ from 'outfile'".to_string(),
            }
            .into());
        }

        if self.compression.indent_level > MAX_INDENT_LEVEL {
            return Err(ConfigError::InvalidValue {
                field: "compression.indentLevel".to_string(),
                value: self.compression.indent_level.to_string(),
                hint: format!("Use a value between 0 and {}", MAX_INDENT_LEVEL),
            }
            .into());
        }

        if self.game.cart.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "game.cart".to_string(),
                value: String::new(),
                hint: "Name the cartridge file TIC-80 should load, e.g. \"game.js\"".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
