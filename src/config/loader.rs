//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "flicknroll.toml";

/// Load configuration from flicknroll.toml, falling back to defaults when
/// no file exists anywhere above the current directory
pub fn load_config() -> Result<Config> {
    match find_config_file() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            load_config_from_path(&path)
        }
        Err(Error::ConfigNotFound) => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::ConfigNotFound,
        _ => Error::Io(e),
    })?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Compile-time constant pattern; a failure here is a bug, not a runtime condition
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Flick N Roll dashboard configuration

[session]
# Where the obfuscated session record is kept between runs
store_path = "${FLICKNROLL_STATE:-./.flicknroll/session.json}"
ttl_hours = 24
restore_timeout_ms = 5000
# What to do with an expired token at startup: "reject", "renew" or "ignore"
expiry_policy = "reject"

# Optional per-route role restrictions. Unlisted routes admit every role.
[routes]
# members = ["Admin", "Manager"]
# reports = ["Admin", "Manager"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_interpolation() {
        env::set_var("FNR_TEST_VAR", "hello");
        let content = "value = \"${FNR_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("FNR_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${FNR_NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_content_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, default_config_content()).unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.session.ttl_hours, 24);
        assert!(config.routes.allowed.is_empty());
    }

    #[test]
    fn test_out_of_range_ttl_rejected_at_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);

        for ttl in ["0", "-1", "9223372036854775807"] {
            fs::write(&path, format!("[session]\nttl_hours = {}\n", ttl)).unwrap();
            let result = load_config_from_path(&path);
            assert!(matches!(result, Err(Error::Config(_))), "ttl_hours = {}", ttl);
        }
    }

    #[test]
    fn test_directory_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from_path(dir.path());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_missing_path_is_config_not_found() {
        let result = load_config_from_path(Path::new("/nonexistent/flicknroll.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound)));
    }
}
