use std::path::Path;

use serde::Deserialize;

use crate::rules::Rule;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub agentgate: AgentGateConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentGateConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3010
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Validation(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

pub fn load_from_file(path: &Path) -> Result<Config, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<Config, LoadError> {
    let cfg: Config = serde_yaml::from_str(yaml)?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &Config) -> Result<(), LoadError> {
    if !cfg.agentgate.url.starts_with("http://") && !cfg.agentgate.url.starts_with("https://") {
        return Err(LoadError::Validation(
            "agentgate.url must start with http:// or https://".into(),
        ));
    }
    if cfg.agentgate.timeout_seconds == 0 {
        return Err(LoadError::Validation(
            "agentgate.timeout_seconds must be > 0".into(),
        ));
    }
    if cfg.server.port == 0 {
        return Err(LoadError::Validation("server.port must be > 0".into()));
    }
    if cfg.rules.is_empty() {
        return Err(LoadError::Validation(
            "rules must contain at least one rule".into(),
        ));
    }
    for (i, rule) in cfg.rules.iter().enumerate() {
        if rule.metric.is_empty() {
            return Err(LoadError::Validation(format!(
                "rules[{i}].metric must not be empty"
            )));
        }
        if rule.ttl_seconds == 0 {
            return Err(LoadError::Validation(format!(
                "rules[{i}].ttl_seconds must be > 0"
            )));
        }
    }
    Ok(())
}
