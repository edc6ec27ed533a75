//! Integration tests for config

#[cfg(test)]
mod tests {
    use remod_config::*;
    use remod_types::ColorChoice;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
color = "never"
quiet = true

[installer]
program = "pnpm"

[paths]
dependency_dir = "vendor_modules"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.color, ColorChoice::Never);
        assert!(config.general.quiet);
        assert_eq!(config.installer.program, "pnpm");
        // Untouched sections keep their defaults
        assert_eq!(config.installer.lockfile, "package-lock.json");
        assert_eq!(config.update.program, "git");
        assert_eq!(config.dependency_dir(), PathBuf::from("vendor_modules"));
    }

    #[tokio::test]
    async fn test_missing_explicit_config_is_an_error() {
        let result = Config::load_from_file(std::path::Path::new("/no/such/config.toml")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.installer.program, "npm");
        assert_eq!(config.dependency_dir(), PathBuf::from("node_modules"));
        assert_eq!(config.temp_dir(), std::env::temp_dir());
        assert!(config.store_path().is_none());
        assert!(!config.general.quiet);
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        // Clean up any existing env vars first
        std::env::remove_var("REMOD_COLOR");
        std::env::remove_var("REMOD_INSTALLER");
        std::env::remove_var("REMOD_STORE_PATH");

        std::env::set_var("REMOD_COLOR", "always");
        std::env::set_var("REMOD_INSTALLER", "yarn");
        std::env::set_var("REMOD_STORE_PATH", "/tmp/remod-store");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.installer.program, "yarn");
        assert_eq!(config.store_path(), Some(PathBuf::from("/tmp/remod-store")));

        // Clean up
        std::env::remove_var("REMOD_COLOR");
        std::env::remove_var("REMOD_INSTALLER");
        std::env::remove_var("REMOD_STORE_PATH");
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        // Clean up any existing env vars first
        std::env::remove_var("REMOD_COLOR");

        std::env::set_var("REMOD_COLOR", "invalid");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        // Clean up
        std::env::remove_var("REMOD_COLOR");
    }
}
