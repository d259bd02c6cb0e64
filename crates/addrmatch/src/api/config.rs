use std::{
  env::{self, VarError},
  fmt::Display,
  str::FromStr,
};

use crate::api::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,

  // Normalization
  pub extractor: ExtractorKind,
  pub extractor_max_input: usize,
  pub lemmas_path: Option<String>,
  pub abbreviations_path: Option<String>,

  // API
  pub max_batch_size: usize,

  // Debugging
  pub enable_prometheus: bool,
  pub enable_tracing: bool,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      env: Env::Dev,
      listen_addr: "0.0.0.0:8000".into(),
      extractor: ExtractorKind::Rules,
      extractor_max_input: 1024,
      lemmas_path: None,
      abbreviations_path: None,
      max_batch_size: 100,
      enable_prometheus: false,
      enable_tracing: false,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    let defaults = Config::default();

    let config = Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
      extractor: env::var("EXTRACTOR").unwrap_or("rules".into()).parse()?,
      extractor_max_input: parse_env("EXTRACTOR_MAX_INPUT", defaults.extractor_max_input)?,
      lemmas_path: env::var("LEMMAS_PATH").ok(),
      abbreviations_path: env::var("ABBREVIATIONS_PATH").ok(),
      max_batch_size: parse_env("MAX_BATCH_SIZE", defaults.max_batch_size)?,
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
      enable_tracing: env::var("ENABLE_TRACING").unwrap_or_default() == "1",
    };

    if config.max_batch_size == 0 {
      return Err(AppError::ConfigError("MAX_BATCH_SIZE must be at least 1".into()));
    }

    Ok(config)
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "dev" => Env::Dev,
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

/// Which address extractor backs the structured normalization path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtractorKind {
  Rules,
  None,
}

impl FromStr for ExtractorKind {
  type Err = AppError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "rules" => Ok(ExtractorKind::Rules),
      "none" => Ok(ExtractorKind::None),
      other => Err(AppError::ConfigError(format!("unsupported extractor kind: {other}"))),
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> Result<T, AppError>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}"))),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}"))),
    },
  }
}
