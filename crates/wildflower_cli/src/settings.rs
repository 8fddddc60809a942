//! Resolves the effective configuration from the config file and flags.

use anyhow::{Context, Result};
use clap::ValueEnum;
use directories_next::ProjectDirs;
use std::path::{Path, PathBuf};
use wildflower_core::{AppConfig, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Remote,
    Local,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Remote => Strategy::Remote,
            StrategyArg::Local => Strategy::Local,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub strategy: Option<StrategyArg>,
    pub endpoint: Option<String>,
    pub model: Option<PathBuf>,
}

/// `<config dir>/wildflower/config.toml` on this platform.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wildflower").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// An explicit path must exist; the default location may be absent.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => match default_config_path() {
            Some(path) => AppConfig::load_or_default(&path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(AppConfig::default()),
        },
    }
}

pub fn apply_overrides(mut cfg: AppConfig, overrides: &Overrides) -> AppConfig {
    if let Some(strategy) = overrides.strategy {
        cfg.strategy = strategy.into();
    }
    if let Some(endpoint) = &overrides.endpoint {
        cfg.remote.endpoint = endpoint.clone();
    }
    if let Some(model) = &overrides.model {
        cfg.local.model_path = model.clone();
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn no_overrides_keeps_config() {
        let cfg = apply_overrides(AppConfig::default(), &Overrides::default());
        assert_eq!(cfg, AppConfig::default());
    }

    #[rstest]
    #[case(StrategyArg::Remote, Strategy::Remote)]
    #[case(StrategyArg::Local, Strategy::Local)]
    fn strategy_flag_wins(#[case] arg: StrategyArg, #[case] expected: Strategy) {
        let overrides = Overrides {
            strategy: Some(arg),
            ..Overrides::default()
        };
        assert_eq!(apply_overrides(AppConfig::default(), &overrides).strategy, expected);
    }

    #[test]
    fn endpoint_and_model_flags_win() {
        let overrides = Overrides {
            strategy: None,
            endpoint: Some("http://127.0.0.1:9000/predict".into()),
            model: Some(PathBuf::from("m.onnx")),
        };
        let cfg = apply_overrides(AppConfig::default(), &overrides);
        assert_eq!(cfg.remote.endpoint, "http://127.0.0.1:9000/predict");
        assert_eq!(cfg.local.model_path, PathBuf::from("m.onnx"));
    }

    #[test]
    fn explicit_config_is_loaded() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("wildflower.toml");
        fs::write(&path, "strategy = \"local\"\n")?;
        let cfg = load_config(Some(path.as_path()))?;
        assert_eq!(cfg.strategy, Strategy::Local);
        Ok(())
    }

    #[test]
    fn missing_explicit_config_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(missing.as_path())).is_err());
        Ok(())
    }
}
