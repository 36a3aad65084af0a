//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, LogFormat};

/// Timeouts above this many milliseconds get a warning.
const LONG_TIMEOUT_MS: u64 = 60 * 60 * 1000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_logging(config, &mut result);
        Self::validate_context(config, &mut result);

        Ok(result)
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        }

        if config.logging.format == LogFormat::Json && config.logging.ansi {
            result.add_warning(ValidationWarning::new(
                "logging.ansi",
                "ansi has no effect with the json format",
            ));
        }
    }

    fn validate_context(config: &Config, result: &mut ValidationResult) {
        match config.context.timeout_ms {
            Some(0) => result.add_error(ValidationError::new(
                "context.timeout_ms",
                "timeout_ms must be greater than 0",
            )),
            Some(ms) if ms > LONG_TIMEOUT_MS => result.add_warning(ValidationWarning::new(
                "context.timeout_ms",
                "timeout_ms is very high (>1h), the root context will rarely time out",
            )),
            _ => {}
        }

        for key in config.context.values.keys() {
            if key.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "context.values",
                    "Value keys cannot be empty",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
