//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CsvConfig, Environment, StrataConfig};
use super::secret::secret_string;
use crate::domain::entity::parse_entity_list;
use crate::domain::errors::StrataError;
use crate::domain::result::Result;
use chrono::NaiveDate;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`StrataConfig`]
/// 4. Applies environment variable overrides (`STRATA_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`StrataError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed, an override is
/// invalid, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use strata::config::load_config;
///
/// let config = load_config("strata.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<StrataConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StrataError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StrataError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    config.validate().map_err(|e| {
        StrataError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitute, parse and override without validating
fn parse_config(contents: &str) -> Result<StrataConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: StrataConfig = toml::from_str(&contents)
        .map_err(|e| StrataError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied unchanged. Every unset variable is reported at
/// once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| StrataError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(StrataError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn invalid_override(key: &str, message: impl std::fmt::Display) -> StrataError {
    StrataError::Configuration(format!("Invalid value for {key}: {message}"))
}

/// Applies environment variable overrides using the `STRATA_*` prefix
///
/// Environment variables follow the pattern `STRATA_<SECTION>_<KEY>`, for
/// example `STRATA_REFRESH_MAX_CONCURRENCY` or `STRATA_TARGET_KIND`.
fn apply_env_overrides(config: &mut StrataConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("STRATA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("STRATA_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override("STRATA_ENVIRONMENT") {
        config.environment = match val.to_ascii_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => return Err(invalid_override("STRATA_ENVIRONMENT", other)),
        };
    }

    // Storage overrides
    if let Some(val) = env_override("STRATA_SOURCE_KIND") {
        config.source.kind = val
            .parse()
            .map_err(|e| invalid_override("STRATA_SOURCE_KIND", e))?;
    }
    if let Some(val) = env_override("STRATA_SOURCE_CSV_DIRECTORY") {
        config.source.csv = Some(CsvConfig {
            directory: PathBuf::from(val),
        });
    }
    if let Some(val) = env_override("STRATA_TARGET_KIND") {
        config.target.kind = val
            .parse()
            .map_err(|e| invalid_override("STRATA_TARGET_KIND", e))?;
    }
    if let Some(val) = env_override("STRATA_TARGET_CSV_DIRECTORY") {
        config.target.csv = Some(CsvConfig {
            directory: PathBuf::from(val),
        });
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Some(val) = env_override("STRATA_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Some(val) = env_override("STRATA_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg_config.max_connections = max;
            }
        }
        if let Some(val) = env_override("STRATA_POSTGRESQL_SSL_MODE") {
            pg_config.ssl_mode = val;
        }
        if let Some(val) = env_override("STRATA_POSTGRESQL_RAW_SCHEMA") {
            pg_config.raw_schema = val;
        }
        if let Some(val) = env_override("STRATA_POSTGRESQL_CONFORMED_SCHEMA") {
            pg_config.conformed_schema = val;
        }
    }

    // Refresh overrides
    if let Some(val) = env_override("STRATA_REFRESH_ENTITIES") {
        config.refresh.entities =
            parse_entity_list(&val).map_err(|e| invalid_override("STRATA_REFRESH_ENTITIES", e))?;
    }
    if let Some(val) = env_override("STRATA_REFRESH_MAX_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.refresh.max_concurrency = concurrency;
        }
    }
    if let Some(val) = env_override("STRATA_REFRESH_AS_OF") {
        let date = NaiveDate::parse_from_str(&val, "%Y-%m-%d")
            .map_err(|e| invalid_override("STRATA_REFRESH_AS_OF", e))?;
        config.refresh.as_of = Some(date);
    }

    // Logging overrides
    if let Some(val) = env_override("STRATA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Some(val) = env_override("STRATA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV_TOML: &str = r#"
[application]
log_level = "info"

[source]
kind = "csv"

[source.csv]
directory = "data/raw"

[target]
kind = "csv"

[target.csv]
directory = "data/conformed"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("STRATA_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${STRATA_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"");
        std::env::remove_var("STRATA_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("STRATA_LOADER_MISSING_VAR");
        let input = "password = \"${STRATA_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("STRATA_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("STRATA_LOADER_COMMENTED_VAR");
        let input = "# connection_string = \"${STRATA_LOADER_COMMENTED_VAR}\"\nkind = \"csv\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(StrataError::Configuration(_))));
    }

    #[test]
    fn test_parse_config_defaults() {
        let config = parse_config(CSV_TOML).unwrap();

        assert_eq!(config.refresh.entities.len(), 6);
        assert_eq!(config.refresh.max_concurrency, 4);
        assert!(config.refresh.as_of.is_none());
        assert!(config.postgresql.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CSV_TOML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(
            config.source.csv.unwrap().directory,
            PathBuf::from("data/raw")
        );
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[source\nkind = ").unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
