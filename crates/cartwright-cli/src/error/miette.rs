//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use ::miette::Report;
use cartwright_bundler::Error as BundlerError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(e) => bundler_error_to_miette(e),
        CliError::Config(e) => ::miette::miette!("Configuration error: {}", e),
        _ => ::miette::miette!("{}", err),
    }
}

/// Convert a pipeline error to miette Report
///
/// Compile errors list every diagnostic on its own line so a failing build
/// reads like the bundler's own output.
pub fn bundler_error_to_miette(err: BundlerError) -> Report {
    match err {
        BundlerError::Compile { diagnostics } if !diagnostics.is_empty() => {
            let lines: Vec<String> = diagnostics
                .iter()
                .map(|d| format!("  {} {}", d.kind, d.message))
                .collect();
            ::miette::miette!(
                "Compile failed with {} error(s):\n{}\n\nHint: Fix the errors above; the previous game file was left untouched",
                diagnostics.len(),
                lines.join("\n")
            )
        }
        BundlerError::ArtifactUnavailable { path, attempts } => ::miette::miette!(
            "Bundled output {} was still empty after {} reads\n\nHint: Check that the entry produces code and that nothing else writes to 'outfile'",
            path.display(),
            attempts
        ),
        other => ::miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartwright_bundler::{CompileDiagnostic, DiagnosticKind};

    #[test]
    fn test_compile_errors_listed() {
        let report = bundler_error_to_miette(BundlerError::Compile {
            diagnostics: vec![
                CompileDiagnostic::new(DiagnosticKind::ParseError, "Unexpected token"),
                CompileDiagnostic::new(DiagnosticKind::UnresolvedImport, "Could not resolve './x'"),
            ],
        });
        let msg = report.to_string();
        assert!(msg.contains("2 error(s)"));
        assert!(msg.contains("ParseError Unexpected token"));
        assert!(msg.contains("UnresolvedImport Could not resolve './x'"));
    }

    #[test]
    fn test_config_error_prefixed() {
        let report = cli_error_to_miette(CliError::Config(
            crate::error::ConfigError::Invalid("bad".to_string()),
        ));
        assert!(report.to_string().starts_with("Configuration error:"));
    }
}
