//! YAML configuration loading and parsing

use crate::config::Config;
use crate::config::schema::validate_against_schema;
use crate::error::SnippetError;
use crate::system::System;
use anyhow::Result;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load, validate and parse the YAML configuration file at `path`
///
/// A missing or empty file yields the default configuration.
pub fn load_config(system: &dyn System, path: &Path) -> Result<Config> {
    if !system.exists(path) {
        debug!("No configuration file at {}", path.display());
        return Ok(Config::default());
    }

    let content = system.read_to_string(path).map_err(|e| {
        SnippetError::configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    parse_config(&content).map_err(|err| {
        anyhow::Error::from(SnippetError::configuration(format!(
            "{}: {err:#}",
            path.display()
        )))
    })
}

/// Parse configuration text, validating it against the embedded schema first
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let raw: Value = serde_yaml::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse YAML configuration: {e}"))?;

    validate_against_schema(&raw)?;

    let config: Config = serde_json::from_value(raw)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    debug!("Loaded configuration: {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
snippets_dir: "/data/snippets"
clone_timeout_secs: 60
"#,
        )
        .unwrap();

        assert_eq!(
            config.snippets_dir.as_deref(),
            Some(Path::new("/data/snippets"))
        );
        assert_eq!(config.clone_timeout_secs, 60);
        assert_eq!(config.listing_timeout_secs, Config::default().listing_timeout_secs);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_config("snippet_dir: /oops\n").unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        let err = parse_config("clone_timeout_secs: 18446744073709551615\n").unwrap_err();
        assert!(err.to_string().contains("validation failed"));

        let err = parse_config("listing_timeout_secs: 86401\n").unwrap_err();
        assert!(err.to_string().contains("validation failed"));

        assert_eq!(
            parse_config("listing_timeout_secs: 86400\n")
                .unwrap()
                .listing_timeout_secs,
            86_400
        );
    }
}
