//! CLI command implementations
//!
//! Every command returns its process exit code:
//! 0 success, 1 partial failure, 2 configuration error, 4 connection error,
//! 5 fatal error.

pub mod init;
pub mod load_raw;
pub mod refresh;
pub mod validate;

use crate::domain::{parse_entity_list, Entity, StrataError};
use chrono::NaiveDate;

/// Exit code for a clean run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when some entities failed or the run was interrupted
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when storage is unreachable
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code for unrecoverable errors
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error raised while setting up storage
pub(crate) fn setup_exit_code(error: &StrataError) -> i32 {
    match error {
        StrataError::Configuration(_) => EXIT_CONFIG,
        _ => EXIT_CONNECTION,
    }
}

/// Parse an `--entity` override
pub(crate) fn parse_entity_override(value: &str) -> Result<Vec<Entity>, String> {
    let entities = parse_entity_list(value)?;
    if entities.is_empty() {
        return Err("--entity requires at least one entity".to_string());
    }
    Ok(entities)
}

/// Parse an `--as-of` override
pub(crate) fn parse_as_of(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid --as-of '{value}' (expected YYYY-MM-DD): {e}"))
}

/// Ask for confirmation on stdin
pub(crate) fn confirm(prompt: &str) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
