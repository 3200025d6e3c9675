//! Maps sink configurations to sink implementations

use super::FileSink;
use crate::core::{Result, Sink, SinkConfiguration};
use serde_json::Value;

#[cfg(feature = "console")]
use super::ConsoleSink;

/// Builds sinks from configuration; holds no state
pub struct SinkFactory;

impl SinkFactory {
    /// Create the sink for a typed configuration
    ///
    /// # Example
    ///
    /// ```
    /// use rust_multisink_logger::sinks::SinkFactory;
    /// use rust_multisink_logger::{FileConfiguration, SinkConfiguration};
    ///
    /// let sink = SinkFactory::create(&FileConfiguration::new("App").into()).unwrap();
    /// assert_eq!(sink.name(), "file");
    ///
    /// assert!(SinkFactory::create(&FileConfiguration::new("").into()).is_err());
    /// ```
    pub fn create(config: &SinkConfiguration) -> Result<Box<dyn Sink>> {
        config.validate()?;
        match config {
            #[cfg(feature = "console")]
            SinkConfiguration::Console(console) => Ok(Box::new(ConsoleSink::new(console.clone()))),
            #[cfg(not(feature = "console"))]
            SinkConfiguration::Console(_) => Err(crate::core::LoggerError::unsupported(format!(
                "{} (built without the 'console' feature)",
                config.type_name()
            ))),
            SinkConfiguration::File(file) => Ok(Box::new(FileSink::new(file)?)),
        }
    }

    /// Create a sink from an untyped configuration document
    ///
    /// Fails with [`LoggerError::InvalidArgument`](crate::LoggerError::InvalidArgument)
    /// for `null` and with
    /// [`LoggerError::UnsupportedConfiguration`](crate::LoggerError::UnsupportedConfiguration)
    /// for an unknown `Type`.
    pub fn create_from_value(config: &Value) -> Result<Box<dyn Sink>> {
        let config = SinkConfiguration::from_value(config)?;
        Self::create(&config)
    }

    /// Create one sink per configuration, preserving order
    pub fn create_all<'a>(
        configs: impl IntoIterator<Item = &'a SinkConfiguration>,
    ) -> Result<Vec<Box<dyn Sink>>> {
        configs.into_iter().map(Self::create).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileConfiguration, LoggerError};
    #[cfg(feature = "console")]
    use crate::core::ConsoleConfiguration;
    use serde_json::json;

    #[test]
    fn test_create_file_sink() {
        let sink = SinkFactory::create(&FileConfiguration::new("App").into()).unwrap();
        assert_eq!(sink.name(), "file");
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_create_console_sink() {
        let sink = SinkFactory::create(&ConsoleConfiguration::new().into()).unwrap();
        assert_eq!(sink.name(), "console");
    }

    #[test]
    fn test_create_all_keeps_order() {
        let configs: Vec<SinkConfiguration> = vec![
            FileConfiguration::new("A").into(),
            FileConfiguration::new("B").into(),
        ];
        let sinks = SinkFactory::create_all(&configs).unwrap();
        assert_eq!(sinks.len(), 2);
    }

    #[test]
    fn test_null_configuration_is_invalid_argument() {
        assert!(matches!(
            SinkFactory::create_from_value(&Value::Null),
            Err(LoggerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_unknown_type_carries_type_name() {
        let err = SinkFactory::create_from_value(&json!({ "Type": "Network", "Host": "x" }))
            .err()
            .expect("unknown type must fail");
        assert!(err.to_string().contains("Network"));
        assert!(matches!(err, LoggerError::UnsupportedConfiguration { .. }));
    }

    #[test]
    fn test_empty_application_name_is_rejected() {
        let result = SinkFactory::create_from_value(&json!({ "Type": "File", "ApplicationName": "" }));
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }
}
