//! # Serializer Configuration
//!
//! Controls how import/export sessions treat recoverable errors, how the
//! text printer lays out documents, and the default log filter used by the
//! command-line tool.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// How a session reports errors that only affect a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Any recorded error fails the whole call with the first error
    #[default]
    FirstErrorWins,
    /// Field errors are returned as diagnostics next to the result;
    /// session-fatal errors still fail the call
    Collect,
}

/// # Printer Configuration
///
/// Layout of the emitted text document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Spaces per nesting level (0 selects tabs)
    pub indent_width: usize,
    /// Print `ID = #uid` on every structure, referenced or not
    pub emit_unused_uids: bool,
}

impl PrinterConfig {
    /// Create a printer configuration with the default layout
    pub fn new() -> Self {
        Self {
            indent_width: 0,
            emit_unused_uids: false,
        }
    }

    /// Set indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Keep UIDs that nothing references
    pub fn with_unused_uids(mut self, enabled: bool) -> Self {
        self.emit_unused_uids = enabled;
        self
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Serializer Configuration
///
/// Top-level configuration consumed by
/// [`Serializer`](crate::serialization::Serializer) and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// Error reporting policy for import and export sessions
    pub error_policy: ErrorPolicy,
    /// Text printer layout
    pub printer: PrinterConfig,
    /// Default log filter (`env_logger` syntax)
    pub log_level: String,
}

impl SerializerConfig {
    /// Create a new serializer configuration
    pub fn new() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            printer: PrinterConfig::default(),
            log_level: "info".to_string(),
        }
    }

    /// Set error policy
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set printer configuration
    pub fn with_printer(mut self, printer: PrinterConfig) -> Self {
        self.printer = printer;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }
        if self.printer.indent_width > 16 {
            return Err(ConfigError::Invalid(format!(
                "indent width {} exceeds 16",
                self.printer.indent_width
            )));
        }
        Ok(())
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SerializerConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SerializerConfig::default();
        assert_eq!(config.error_policy, ErrorPolicy::FirstErrorWins);
        assert!(!config.printer.emit_unused_uids);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_log_level() {
        let config = SerializerConfig::new().with_log_level("  ");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SerializerConfig::new()
            .with_error_policy(ErrorPolicy::Collect)
            .with_printer(PrinterConfig::new().with_indent_width(2).with_unused_uids(true));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SerializerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.error_policy, ErrorPolicy::Collect);
        assert_eq!(parsed.printer.indent_width, 2);
        assert!(parsed.printer.emit_unused_uids);
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = std::env::temp_dir().join(format!("vlx_config_{}.ron", std::process::id()));
        let config = SerializerConfig::new().with_log_level("debug");
        config.save_to_file(&path).unwrap();
        let loaded = SerializerConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.log_level, "debug");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = SerializerConfig::load_from_file("settings.ini");
        assert!(result.is_err());
    }
}
