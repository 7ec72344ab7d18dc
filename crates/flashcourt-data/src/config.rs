//! Configuration file handling.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use flashcourt_core::level::QuizMode;

use crate::source::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS};

/// Top-level flashcourt configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcourtConfig {
    /// URL or file path of the player CSV.
    #[serde(default = "default_source")]
    pub source: String,
    /// Quiz flavour.
    #[serde(default)]
    pub mode: QuizMode,
    /// Fixed RNG seed for reproducible quizzes.
    #[serde(default)]
    pub seed: Option<u64>,
    /// HTTP timeout for remote sources.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_source() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for FlashcourtConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            mode: QuizMode::default(),
            seed: None,
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `flashcourt.toml` in the current directory
/// 2. `~/.config/flashcourt/config.toml`
///
/// Environment variable override: `FLASHCOURT_SOURCE`.
pub fn load_config() -> Result<FlashcourtConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<FlashcourtConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashcourt.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FlashcourtConfig::default(),
    };

    if let Ok(source) = std::env::var("FLASHCOURT_SOURCE") {
        if !source.is_empty() {
            config.source = source;
        }
    }

    Ok(config)
}

/// Parse a TOML document and resolve `${VAR}` references in the source.
pub fn parse_config(content: &str) -> Result<FlashcourtConfig> {
    let mut config: FlashcourtConfig = toml::from_str(content)?;
    config.source = resolve_env_vars(&config.source);
    anyhow::ensure!(
        config.request_timeout_secs > 0,
        "request_timeout_secs must be at least 1"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashcourt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_FLASHCOURT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_FLASHCOURT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_FLASHCOURT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_FLASHCOURT_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_values() {
        std::env::set_var("_FLASHCOURT_SELF_REF", "${_FLASHCOURT_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_FLASHCOURT_SELF_REF}/b"),
            "a/${_FLASHCOURT_SELF_REF}/b"
        );
        std::env::remove_var("_FLASHCOURT_SELF_REF");
        assert_eq!(resolve_env_vars("${_FLASHCOURT_UNSET_VAR}x"), "x");
    }

    #[test]
    fn default_config() {
        let config = FlashcourtConfig::default();
        assert_eq!(config.source, DEFAULT_SOURCE_URL);
        assert_eq!(config.mode, QuizMode::Leveled);
        assert_eq!(config.seed, None);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
source = "data/players.csv"
mode = "classic"
seed = 42
request_timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.source, "data/players.csv");
        assert_eq!(config.mode, QuizMode::Classic);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn parse_partial_config_fills_defaults() {
        let config = parse_config("seed = 7\n").unwrap();
        assert_eq!(config.source, DEFAULT_SOURCE_URL);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse_config("request_timeout_secs = 0\n").is_err());
        assert!(parse_config("mode = \"endless\"\n").is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/flashcourt.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcourt.toml");
        std::fs::write(&path, "mode = \"classic\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.mode, QuizMode::Classic);
    }
}
