//! Process configuration: `.env` discovery and the model backend settings.
//!
//! Everything here is read once at startup. Values come from a lookup
//! function so callers (and tests) can supply their own environment instead
//! of mutating the process one.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// File whose presence marks the project root.
pub const PROJECT_MANIFEST: &str = "Cargo.toml";
pub const ENV_FILE: &str = ".env";

pub const MODEL_TYPE_VAR: &str = "MODEL_TYPE";
pub const OLLAMA_MODEL_NAME_VAR: &str = "OLLAMA_MODEL_NAME";
pub const OLLAMA_API_BASE_VAR: &str = "OLLAMA_API_BASE";
pub const GEMINI_MODEL_NAME_VAR: &str = "GEMINI_MODEL_NAME";
pub const STREAM_VAR: &str = "STREAM";
pub const DELEGATION_VAR: &str = "DELEGATION";

// Defaults
const DEFAULT_MODEL_TYPE: &str = "ollama";
const DEFAULT_OLLAMA_MODEL_NAME: &str = "qwen3:14b";
const DEFAULT_OLLAMA_API_BASE: &str = "http://localhost:11434";
const DEFAULT_GEMINI_MODEL_NAME: &str = "gemini-2.5-flash";
const DEFAULT_STREAM: &str = "false";
const DEFAULT_DELEGATION: &str = "tools";

/// Walk up from `start` to the nearest directory containing [`PROJECT_MANIFEST`].
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MANIFEST).is_file())
        .map(Path::to_path_buf)
}

/// Load `.env` from the project root above `start` (or `start` itself when no
/// root is found). Values override variables already set in the process.
///
/// Returns the path that was loaded, or `None` if there was no file.
///
/// Lines are applied as they are parsed: on a malformed file the lines before
/// the bad one are already in the process environment when the error is
/// returned. `main` treats the error as fatal.
pub fn load_env_file(start: &Path) -> Result<Option<PathBuf>> {
    let root = find_project_root(start).unwrap_or_else(|| start.to_path_buf());
    let env_path = root.join(ENV_FILE);
    if !env_path.is_file() {
        debug!(path = %env_path.display(), "no .env file");
        return Ok(None);
    }

    dotenvy::from_path_override(&env_path).map_err(|e| {
        Error::config(format!("Failed to load {}: {e}", env_path.display()))
    })?;
    info!(path = %env_path.display(), "loaded .env");
    Ok(Some(env_path))
}

/// `true`, `1` and `yes` (any case) enable streaming; anything else disables it.
pub fn parse_stream_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Which model-serving mechanism backs the agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local Ollama server, reached through a LiteLLM client.
    #[default]
    Ollama,
    /// Hosted Gemini API, referenced by model name.
    Gemini,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "gemini" => Ok(Self::Gemini),
            _ => Err(Error::config(format!(
                "{MODEL_TYPE_VAR} '{s}' is not supported (expected 'ollama' or 'gemini')"
            ))),
        }
    }
}

/// How the coordinator reaches the specialist agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delegation {
    /// Each specialist is wrapped as an agent-as-tool.
    #[default]
    Tools,
    /// Specialists are attached as sub-agents.
    SubAgents,
}

impl FromStr for Delegation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "tools" => Ok(Self::Tools),
            "sub_agents" => Ok(Self::SubAgents),
            _ => Err(Error::config(format!(
                "{DELEGATION_VAR} '{s}' is not supported (expected 'tools' or 'sub_agents')"
            ))),
        }
    }
}

/// Model backend settings.
///
/// Fields are private: a value only exists once [`BackendConfig::new`] has
/// checked that the selected kind has a model name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendConfig {
    kind: BackendKind,
    ollama_model_name: String,
    ollama_api_base: String,
    gemini_model_name: String,
    stream: bool,
}

impl BackendConfig {
    pub fn new(
        kind: BackendKind,
        ollama_model_name: impl Into<String>,
        ollama_api_base: impl Into<String>,
        gemini_model_name: impl Into<String>,
        stream: bool,
    ) -> Result<Self> {
        let config = Self {
            kind,
            ollama_model_name: ollama_model_name.into(),
            ollama_api_base: ollama_api_base.into(),
            gemini_model_name: gemini_model_name.into(),
            stream,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`. Unset keys take their default; a key that is set
    /// but empty stays empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let kind: BackendKind = get(MODEL_TYPE_VAR, DEFAULT_MODEL_TYPE).parse()?;
        let config = Self::new(
            kind,
            get(OLLAMA_MODEL_NAME_VAR, DEFAULT_OLLAMA_MODEL_NAME),
            get(OLLAMA_API_BASE_VAR, DEFAULT_OLLAMA_API_BASE),
            get(GEMINI_MODEL_NAME_VAR, DEFAULT_GEMINI_MODEL_NAME),
            parse_stream_flag(&get(STREAM_VAR, DEFAULT_STREAM)),
        )?;
        debug!(kind = %config.kind, stream = config.stream, "backend config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match self.kind {
            BackendKind::Ollama if self.ollama_model_name.is_empty() => Err(Error::config(
                format!("{OLLAMA_MODEL_NAME_VAR} is required when {MODEL_TYPE_VAR} is 'ollama'"),
            )),
            BackendKind::Gemini if self.gemini_model_name.is_empty() => Err(Error::config(
                format!("{GEMINI_MODEL_NAME_VAR} is required when {MODEL_TYPE_VAR} is 'gemini'"),
            )),
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn ollama_model_name(&self) -> &str {
        &self.ollama_model_name
    }

    pub fn ollama_api_base(&self) -> &str {
        &self.ollama_api_base
    }

    pub fn gemini_model_name(&self) -> &str {
        &self.gemini_model_name
    }

    pub fn stream(&self) -> bool {
        self.stream
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            ollama_model_name: DEFAULT_OLLAMA_MODEL_NAME.into(),
            ollama_api_base: DEFAULT_OLLAMA_API_BASE.into(),
            gemini_model_name: DEFAULT_GEMINI_MODEL_NAME.into(),
            stream: false,
        }
    }
}

/// Everything the agents need, built once in `main` and passed down.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub delegation: Delegation,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let delegation = lookup(DELEGATION_VAR)
            .unwrap_or_else(|| DEFAULT_DELEGATION.into())
            .parse()?;
        Ok(Self {
            backend: BackendConfig::from_lookup(&lookup)?,
            delegation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = BackendConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.kind(), BackendKind::Ollama);
        assert_eq!(config.ollama_model_name(), "qwen3:14b");
        assert_eq!(config.ollama_api_base(), "http://localhost:11434");
        assert_eq!(config.gemini_model_name(), "gemini-2.5-flash");
        assert!(!config.stream());
    }

    #[test]
    fn model_type_is_case_insensitive() {
        let config = BackendConfig::from_lookup(lookup(&[("MODEL_TYPE", "GeMiNi")])).unwrap();
        assert_eq!(config.kind(), BackendKind::Gemini);
    }

    #[test]
    fn unknown_model_type_is_config_error() {
        let err = BackendConfig::from_lookup(lookup(&[("MODEL_TYPE", "openai")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("openai"));
    }

    #[test]
    fn unknown_model_type_error_quotes_raw_value() {
        let err = BackendConfig::from_lookup(lookup(&[("MODEL_TYPE", "OpenAI")])).unwrap_err();
        assert!(
            err.to_string().contains("MODEL_TYPE 'OpenAI' is not supported"),
            "unexpected message: {err}"
        );
    }

    #[test]
    fn set_but_empty_name_fails_validation() {
        let err = BackendConfig::from_lookup(lookup(&[("OLLAMA_MODEL_NAME", "")])).unwrap_err();
        assert!(err.to_string().contains("OLLAMA_MODEL_NAME"));
    }

    #[test]
    fn empty_name_for_other_kind_is_allowed() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("MODEL_TYPE", "gemini"),
            ("OLLAMA_MODEL_NAME", ""),
        ]))
        .unwrap();
        assert_eq!(config.ollama_model_name(), "");
    }

    #[test]
    fn new_rejects_missing_hosted_name() {
        let err = BackendConfig::new(BackendKind::Gemini, "llama2", "", "", false).unwrap_err();
        assert!(err.to_string().contains("GEMINI_MODEL_NAME"));
    }

    #[test]
    fn new_rejects_missing_local_name() {
        assert!(BackendConfig::new(BackendKind::Ollama, "", "", "gemini-pro", true).is_err());
    }

    #[test]
    fn stream_flag_values() {
        for on in ["true", "TRUE", "1", "yes", "Yes"] {
            assert!(parse_stream_flag(on), "{on} should enable streaming");
        }
        for off in ["false", "0", "no", "", "on", " true"] {
            assert!(!parse_stream_flag(off), "{off:?} should not enable streaming");
        }
    }

    #[test]
    fn delegation_defaults_to_tools() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.delegation, Delegation::Tools);
    }

    #[test]
    fn delegation_accepts_sub_agents() {
        let settings = Settings::from_lookup(lookup(&[("DELEGATION", "sub-agents")])).unwrap();
        assert_eq!(settings.delegation, Delegation::SubAgents);
        assert!(Settings::from_lookup(lookup(&[("DELEGATION", "router")])).is_err());
    }
}
