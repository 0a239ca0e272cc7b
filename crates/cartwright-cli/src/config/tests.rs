#[cfg(test)]
mod tests {
    use crate::cli::ProjectArgs;
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use serial_test::serial;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"{
        "entry": "src/main.ts",
        "outfile": "build/bundle.js",
        "minify": true,
        "tic": { "ticExecutable": "/opt/tic80/tic80", "cartsDirectory": "carts" },
        "compression": { "compressedFile": "build/game.js", "mangle": true },
        "game": { "title": "Pong", "cart": "pong.tic", "backup": true }
    }"#;

    fn project_with(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), config).unwrap();
        temp
    }

    #[test]
    fn test_serialization() {
        let config: CartConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.entry, Some(PathBuf::from("src/main.ts")));
        assert!(config.minify);
        assert!(!config.tree_shaking);
        assert_eq!(config.compression.indent_level, 2);
        assert!(config.compression.mangle);
        assert_eq!(config.game.cart, "pong.tic");

        // camelCase field names
        let json_val = serde_json::to_value(&config).unwrap();
        assert!(json_val.get("treeShaking").is_some());
        assert!(json_val["tic"].get("ticExecutable").is_some());
        assert!(json_val["compression"].get("compressedFile").is_some());
        assert!(json_val.get("tree_shaking").is_none());

        // skip_serializing_if
        let minimal = serde_json::to_value(CartConfig::default()).unwrap();
        assert!(minimal.get("entry").is_none());
        assert!(minimal["tic"].get("ticExecutable").is_none());
        assert_eq!(minimal["game"]["cart"], "game.js");
    }

    #[test]
    fn test_aliases() {
        let config: CartConfig = serde_json::from_str(
            r#"{ "entryPath": "src/main.js", "outFile": "out/bundle.js" }"#,
        )
        .unwrap();
        assert_eq!(config.entry, Some(PathBuf::from("src/main.js")));
        assert_eq!(config.outfile, Some(PathBuf::from("out/bundle.js")));
    }

    #[test]
    fn test_validation_missing_fields_in_order() {
        let field_of = |config: &CartConfig| match config.validate() {
            Err(CliError::Config(ConfigError::MissingField { field, .. })) => field,
            other => panic!("expected missing field, got {other:?}"),
        };

        let mut config = CartConfig::default();
        assert_eq!(field_of(&config), "entry");

        config.entry = Some(PathBuf::from("src/main.ts"));
        assert_eq!(field_of(&config), "outfile");

        config.outfile = Some(PathBuf::from("build/bundle.js"));
        assert_eq!(field_of(&config), "compression.compressedFile");

        config.compression.compressed_file = Some(PathBuf::from("build/game.js"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_blank_entry_is_missing() {
        let config: CartConfig = serde_json::from_str(r#"{ "entry": "" }"#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.is_graceful());
    }

    #[test]
    fn test_validation_invalid_values() {
        let mut config: CartConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        config.compression.indent_level = 12;
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::InvalidValue { .. }))
        ));

        let mut config: CartConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        config.compression.compressed_file = config.outfile.clone();
        let err = config.validate().unwrap_err();
        assert!(!err.is_graceful());
    }

    #[test]
    fn test_to_build_config_resolves_paths() {
        let config: CartConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        let build = config.to_build_config(Path::new("/games/pong")).unwrap();

        assert_eq!(build.cwd, PathBuf::from("/games/pong"));
        assert_eq!(build.entry_path, PathBuf::from("/games/pong/src/main.ts"));
        assert_eq!(build.out_file, PathBuf::from("/games/pong/build/bundle.js"));
        assert_eq!(
            build.compressed_file,
            PathBuf::from("/games/pong/build/game.js")
        );
        assert_eq!(build.tic_executable, Some(PathBuf::from("/opt/tic80/tic80")));
        assert!(build.minify);
        assert!(build.compression.mangle);
        assert_eq!(build.game.title.as_deref(), Some("Pong"));
    }

    #[test]
    fn test_executable_on_path_left_alone() {
        let mut config: CartConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        config.tic.tic_executable = Some(PathBuf::from("tic80"));
        let build = config.to_build_config(Path::new("/games/pong")).unwrap();
        assert_eq!(build.tic_executable, Some(PathBuf::from("tic80")));

        config.tic.tic_executable = Some(PathBuf::from("bin/tic80"));
        let build = config.to_build_config(Path::new("/games/pong")).unwrap();
        assert_eq!(
            build.tic_executable,
            Some(PathBuf::from("/games/pong/bin/tic80"))
        );
    }

    #[test]
    fn test_blank_executable_means_build_only() {
        let mut config: CartConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        config.tic.tic_executable = Some(PathBuf::new());
        let build = config.to_build_config(Path::new("/games/pong")).unwrap();
        assert!(build.tic_executable.is_none());
    }

    #[test]
    fn test_runtime_settings() {
        let config: CartConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        let settings = config.runtime_settings(Path::new("/games/pong"));
        assert_eq!(settings.cart, "pong.tic");
        assert_eq!(
            settings.carts_directory,
            Some(PathBuf::from("/games/pong/carts"))
        );
        assert!(settings.backup);
    }

    #[test]
    #[serial]
    fn test_load_from_project_dir() {
        let temp = project_with(FULL_CONFIG);
        let config = CartConfig::load(&ProjectArgs::default(), temp.path()).unwrap();
        assert_eq!(config.entry, Some(PathBuf::from("src/main.ts")));
        assert_eq!(config.compression.indent_level, 2);
        assert!(config.game.backup);
    }

    #[test]
    #[serial]
    fn test_load_cli_overrides_file() {
        let temp = project_with(
            r#"{ "entry": "a.ts", "outfile": "b.js", "compression": { "compressedFile": "c.js", "indentLevel": 4 } }"#,
        );
        let args = ProjectArgs {
            tree_shaking: true,
            compress: true,
            indent_level: Some(1),
            ..ProjectArgs::default()
        };

        let config = CartConfig::load(&args, temp.path()).unwrap();
        assert!(config.tree_shaking);
        assert!(config.compression.compress);
        assert_eq!(config.compression.indent_level, 1);
        assert_eq!(
            config.compression.compressed_file,
            Some(PathBuf::from("c.js"))
        );
    }

    #[test]
    #[serial]
    fn test_load_env_override() {
        let temp = project_with(r#"{ "entry": "a.ts", "minify": false }"#);
        std::env::set_var("CARTWRIGHT_MINIFY", "true");
        let config = CartConfig::load(&ProjectArgs::default(), temp.path());
        std::env::remove_var("CARTWRIGHT_MINIFY");

        assert!(config.unwrap().minify);
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = CartConfig::load(&ProjectArgs::default(), temp.path()).unwrap();
        assert_eq!(config, CartConfig::default());
        assert!(config.validate().unwrap_err().is_graceful());
    }

    #[test]
    #[serial]
    fn test_load_explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let args = ProjectArgs {
            config: Some(PathBuf::from("nope.json")),
            ..ProjectArgs::default()
        };
        let err = CartConfig::load(&args, temp.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
        assert!(!err.is_graceful());
    }

    #[test]
    #[serial]
    fn test_load_invalid_json() {
        let temp = project_with(r#"{ "entry": "a.ts", }"#);
        let err = CartConfig::load(&ProjectArgs::default(), temp.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));
    }
}
