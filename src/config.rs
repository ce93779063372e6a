use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::env;
use std::str::FromStr;

use crate::errors::ErrorWrapper;

/// Which rendering of an error to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// `cause: [...]; code: [...]`
    Plain,
    /// `{"code": [...], "message": [...], "status": [...], "cause": "..."}`
    Verbose,
    /// Map form serialized as JSON
    Json,
}

impl RenderFormat {
    pub fn render(&self, err: &ErrorWrapper) -> String {
        match self {
            Self::Plain => err.to_string(),
            Self::Verbose => err.verbose(),
            Self::Json => Value::Object(err.json()).to_string(),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "verbose" => Ok(Self::Verbose),
            "json" => Ok(Self::Json),
            other => bail!("unknown render format: {}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub format: RenderFormat,
    pub log_filter: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::Verbose,
            log_filter: "warn,wrapperrors=info".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(RenderConfig {
            format: match env::var("WRAPPERRORS_FORMAT") {
                Ok(value) => value
                    .parse()
                    .context("WRAPPERRORS_FORMAT must be one of plain, verbose, json")?,
                Err(_) => defaults.format,
            },
            log_filter: env::var("WRAPPERRORS_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ErrorWrapper {
        ErrorWrapper::define("not_found", 404)
            .from_definition(Some("sql: no rows in result set".into()))
            .with_message("car has not been found in the database")
    }

    #[test]
    fn test_parse_render_format() {
        assert_eq!("plain".parse::<RenderFormat>().unwrap(), RenderFormat::Plain);
        assert_eq!(" Verbose ".parse::<RenderFormat>().unwrap(), RenderFormat::Verbose);
        assert_eq!("JSON".parse::<RenderFormat>().unwrap(), RenderFormat::Json);
        assert!("yaml".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_render_plain_and_verbose() {
        let err = sample();
        assert_eq!(
            RenderFormat::Plain.render(&err),
            "cause: [sql: no rows in result set]; code: [not_found]"
        );
        assert_eq!(RenderFormat::Verbose.render(&err), err.verbose());
    }

    #[test]
    fn test_render_json() {
        let rendered = RenderFormat::Json.render(&sample());
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["status"][0]["code"], 404);
        assert_eq!(value["cause"], "sql: no rows in result set");
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.format, RenderFormat::Verbose);
        assert_eq!(config.log_filter, "warn,wrapperrors=info");
    }
}
