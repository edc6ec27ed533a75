//! Integration tests for error types

#[cfg(test)]
mod tests {
    use remod_errors::*;

    #[test]
    fn test_error_conversion() {
        let relocation_err = RelocationError::RenameFailed {
            from: "node_modules".into(),
            to: "/tmp/node_modules_to_remove_7".into(),
            message: "cross-device link".into(),
        };
        let err: Error = relocation_err.into();
        assert!(matches!(err, Error::Relocation(_)));
    }

    #[test]
    fn test_error_display() {
        let err = InstallError::ExitFailure {
            program: "npm".into(),
            code: 1,
        };
        assert_eq!(err.to_string(), "npm exited with status 1");

        let err = StoreError::ParseFailed {
            path: "/home/u/.remod".into(),
            message: "expected value at line 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "store file /home/u/.remod is corrupt: expected value at line 1"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = CleanupError::RemoveFailed {
            path: "/tmp/node_modules_to_remove_7".into(),
            message: "permission denied".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
    }

    #[test]
    fn test_user_facing_surface() {
        let err: Error = InstallError::ExitFailure {
            program: "npm".into(),
            code: 127,
        }
        .into();
        assert_eq!(err.user_code(), Some("install.exit_failure"));
        assert!(err.is_retryable());
        assert!(err.user_hint().is_some());

        let err: Error = UpdateError::SpawnFailed {
            message: "No such file or directory".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("update.spawn_failed"));
        assert!(!err.is_retryable());

        let err: Error = ConfigError::ParseError {
            message: "unexpected token".into(),
        }
        .into();
        assert_eq!(
            err.user_hint(),
            Some("Check your remod configuration file.")
        );
    }

    #[test]
    fn test_config_hint_for_every_variant() {
        let err = ConfigError::NotFound {
            path: "/etc/remod/config.toml".into(),
        };
        assert_eq!(
            err.user_hint(),
            Some("Provide a configuration file at the given path or drop the --config flag.")
        );

        let fix_hint = Some("Fix the configuration value and retry the command.");
        let err = ConfigError::Invalid {
            message: "unknown field `instal`".into(),
        };
        assert_eq!(err.user_hint(), fix_hint);

        let err = ConfigError::ParseError {
            message: "unexpected token".into(),
        };
        assert_eq!(err.user_hint(), fix_hint);

        let err = ConfigError::InvalidValue {
            field: "general.quiet".into(),
            value: "maybe".into(),
        };
        assert_eq!(err.user_hint(), fix_hint);
    }
}
