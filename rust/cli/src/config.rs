//! Table settings resolved from defaults, an optional TOML file and `MEADOW_*`
//! environment variables, in that order of precedence.

use std::fs;

use meadow_ai::Difficulty;
use meadow_engine::betting::BettingConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Starting stacks default to this many big blinds.
pub const DEFAULT_STACK_BLINDS: u32 = 10;

/// Both stacks together must fit the engine's chip range.
pub const MAX_STACK: u32 = u32::MAX / 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub stake: u32,
    /// `None` means [`DEFAULT_STACK_BLINDS`] big blinds.
    pub starting_stack: Option<u32>,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    /// Pause before the dealer's action is shown.
    pub think_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stake: 100,
            starting_stack: None,
            difficulty: Difficulty::Seedling,
            seed: None,
            think_ms: 0,
        }
    }
}

impl Config {
    /// Table limits for this stake at this difficulty.
    pub fn betting(&self) -> BettingConfig {
        BettingConfig::for_stake(self.stake, self.difficulty.max_bet_multiplier())
    }

    pub fn stack(&self) -> u32 {
        self.starting_stack
            .unwrap_or_else(|| self.betting().big_blind.saturating_mul(DEFAULT_STACK_BLINDS))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub stake: ValueSource,
    pub starting_stack: ValueSource,
    pub difficulty: ValueSource,
    pub seed: ValueSource,
    pub think_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            stake: ValueSource::Default,
            starting_stack: ValueSource::Default,
            difficulty: ValueSource::Default,
            seed: ValueSource::Default,
            think_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("MEADOW_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.stake {
            cfg.stake = v;
            sources.stake = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = Some(v);
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.difficulty {
            cfg.difficulty = v;
            sources.difficulty = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.think_ms {
            cfg.think_ms = v;
            sources.think_ms = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("MEADOW_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {seed}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(stake) = env_value("MEADOW_STAKE") {
        cfg.stake = stake
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid stake: {stake}")))?;
        sources.stake = ValueSource::Env;
    }
    if let Some(d) = env_value("MEADOW_DIFFICULTY") {
        cfg.difficulty = d.parse().map_err(ConfigError::Invalid)?;
        sources.difficulty = ValueSource::Env;
    }
    if let Some(ms) = env_value("MEADOW_THINK_MS") {
        cfg.think_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid think_ms: {ms}")))?;
        sources.think_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    stake: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    think_ms: Option<u64>,
}

pub(crate) fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.stake == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: stake must be >0".into(),
        ));
    }
    if cfg.starting_stack == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.stack() > MAX_STACK {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: starting stack {} exceeds {}",
            cfg.stack(),
            MAX_STACK
        )));
    }
    Ok(())
}
