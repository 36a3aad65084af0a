    use super::*;
    use crate::schema::LogFormat;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.context.timeout_ms = Some(0);

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "context.timeout_ms"));
    }

    #[test]
    fn test_validate_long_timeout_warning() {
        let mut config = Config::default();
        config.context.timeout_ms = Some(2 * 60 * 60 * 1000);

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "context.timeout_ms"));
    }

    #[test]
    fn test_validate_empty_level() {
        let mut config = Config::default();
        config.logging.level = "  ".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "logging.level"));
    }

    #[test]
    fn test_validate_json_with_ansi_warning() {
        let mut config = Config::default();
        config.logging.format = LogFormat::Json;

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "logging.ansi"));

        config.logging.ansi = false;
        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_empty_value_key() {
        let mut config = Config::default();
        config
            .context
            .values
            .insert(String::new(), serde_json::json!(1));

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "context.values"));
    }

    #[test]
    fn test_validation_error_new() {
        let err = ValidationError::new("context.timeout_ms", "bad");
        assert_eq!(err.path, "context.timeout_ms");
        assert_eq!(err.message, "bad");
    }
