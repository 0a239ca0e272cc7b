//! JavaScript minification backed by oxc.
//!
//! Game scripts are parsed as classic scripts, not modules: TIC-80 looks up
//! `TIC`, `BOOT` and friends as globals, so top-level bindings must keep
//! their names. Mangling therefore only ever touches nested scopes.

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{
    CompressOptions, CompressOptionsKeepNames, MangleOptions, MangleOptionsKeepNames,
    Minifier as OxcPass, MinifierOptions,
};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::config::CompressionOptions;
use crate::{Error, Result};

/// What a minify pass should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Syntax-level rewrites (dead branches, constant folding).
    pub compress: bool,
    /// Rename local bindings. Top-level names are never renamed.
    pub mangle: bool,
    /// Strip whitespace and comments from the output.
    pub whitespace: bool,
    /// Indentation width when whitespace is kept.
    pub indent_width: u8,
    /// Keep `Function.name` and `Class.name` intact while compressing.
    pub keep_names: bool,
}

impl MinifyOptions {
    /// Compiler-stage minification: syntax and whitespace only.
    pub fn syntax_only() -> Self {
        Self {
            compress: true,
            mangle: false,
            whitespace: true,
            indent_width: 2,
            keep_names: true,
        }
    }

    /// Second pass over the assembled game code.
    pub fn second_pass(compression: &CompressionOptions) -> Self {
        Self {
            compress: compression.compress,
            mangle: compression.mangle,
            whitespace: compression.is_active(),
            indent_width: compression.indent_level,
            keep_names: false,
        }
    }
}

/// Compression never joins `var` declarations.
fn compress_options(options: &MinifyOptions) -> CompressOptions {
    CompressOptions {
        join_vars: false,
        keep_names: if options.keep_names {
            CompressOptionsKeepNames::all_true()
        } else {
            CompressOptionsKeepNames::all_false()
        },
        ..CompressOptions::default()
    }
}

/// A JavaScript minifier.
pub trait Minifier: Send + Sync {
    fn minify(&self, source: &str, options: &MinifyOptions) -> Result<String>;
}

/// [`Minifier`] implemented with the oxc parser, minifier and codegen.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcMinifier;

impl Minifier for OxcMinifier {
    fn minify(&self, source: &str, options: &MinifyOptions) -> Result<String> {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, SourceType::cjs()).parse();

        if parsed.panicked || !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
            return Err(Error::Minify(if messages.is_empty() {
                "parser aborted".to_string()
            } else {
                messages.join("; ")
            }));
        }

        let mut program = parsed.program;

        let pass_options = MinifierOptions {
            mangle: options.mangle.then(|| MangleOptions {
                top_level: false,
                keep_names: MangleOptionsKeepNames {
                    function: true,
                    class: true,
                },
                ..MangleOptions::default()
            }),
            compress: options.compress.then(|| compress_options(options)),
        };
        let scoping = OxcPass::new(pass_options)
            .minify(&allocator, &mut program)
            .scoping;

        let codegen_options = if options.whitespace {
            CodegenOptions::minify()
        } else {
            CodegenOptions {
                indent_width: usize::from(options.indent_width),
                ..CodegenOptions::default()
            }
        };

        Ok(Codegen::new()
            .with_options(codegen_options)
            .with_scoping(scoping)
            .build(&program)
            .code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mangle_only() -> MinifyOptions {
        MinifyOptions {
            compress: false,
            mangle: true,
            whitespace: true,
            indent_width: 2,
            keep_names: false,
        }
    }

    #[test]
    fn test_mangle_keeps_top_level_names() {
        let source = "function TIC() { var playerPosition = 10; print(playerPosition); }\nvar score = 0;";
        let out = OxcMinifier.minify(source, &mangle_only()).unwrap();

        assert!(out.contains("function TIC("), "{out}");
        assert!(out.contains("score"), "{out}");
        assert!(!out.contains("playerPosition"), "{out}");
    }

    #[test]
    fn test_compress_keeps_unreferenced_globals() {
        let source = "function BOOT() { cls(0); }\nfunction TIC() { cls(1); }";
        let out = OxcMinifier
            .minify(source, &MinifyOptions::syntax_only())
            .unwrap();

        assert!(out.contains("function BOOT("), "{out}");
        assert!(out.contains("function TIC("), "{out}");
    }

    #[test]
    fn test_whitespace_removed() {
        let source = "function TIC() {\n    // draw\n    cls(0);\n}\n";
        let out = OxcMinifier
            .minify(source, &MinifyOptions::syntax_only())
            .unwrap();
        assert!(!out.contains("// draw"), "{out}");
        assert!(out.len() < source.len());
    }

    #[test]
    fn test_second_pass_options() {
        let off = MinifyOptions::second_pass(&CompressionOptions::default());
        assert!(!off.compress && !off.mangle && !off.whitespace);

        let on = MinifyOptions::second_pass(&CompressionOptions {
            compress: true,
            mangle: false,
            indent_level: 4,
        });
        assert!(on.compress && on.whitespace);
        assert_eq!(on.indent_width, 4);
    }

    #[test]
    fn test_compress_keeps_var_declarations_apart() {
        let source = "var a = 1;\nvar b = 2;\nfunction TIC() { print(a + b); }";
        let options = MinifyOptions::second_pass(&CompressionOptions {
            compress: true,
            mangle: false,
            indent_level: 2,
        });
        let out = OxcMinifier.minify(source, &options).unwrap();

        assert!(out.contains("var a=1"), "{out}");
        assert!(out.contains("var b=2"), "{out}");
        assert!(!out.contains("a=1,b=2"), "{out}");
    }

    #[test]
    fn test_compress_options() {
        let compile = compress_options(&MinifyOptions::syntax_only());
        assert!(!compile.join_vars);
        assert!(compile.keep_names.function && compile.keep_names.class);

        let second = compress_options(&MinifyOptions::second_pass(&CompressionOptions::default()));
        assert!(!second.join_vars);
        assert!(!second.keep_names.function && !second.keep_names.class);
    }

    #[test]
    fn test_syntax_error_reported() {
        let err = OxcMinifier
            .minify("function TIC( {", &MinifyOptions::syntax_only())
            .unwrap_err();
        assert!(matches!(err, Error::Minify(_)));
    }
}
