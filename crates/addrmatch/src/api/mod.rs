use std::sync::Arc;

use axum::{
  Router, middleware,
  routing::{get, post},
};
use libaddrmatch::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::{
  api::{
    config::{Config, ExtractorKind},
    errors::AppError,
  },
  trace::build_prometheus,
};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

pub type AppMatcher = Matcher<DictionaryLemmatizer, Box<dyn AddressExtractor>>;

#[derive(Clone)]
pub struct AppState {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub matcher: Arc<AppMatcher>,
}

/// Build the matcher described by the configuration.
pub fn build_matcher(config: &Config) -> Result<AppMatcher, AppError> {
  let lemmatizer = match &config.lemmas_path {
    Some(path) => DictionaryLemmatizer::from_yaml(&read_dictionary(path)?)?,
    None => DictionaryLemmatizer::default(),
  };

  let extractor: Box<dyn AddressExtractor> = match config.extractor {
    ExtractorKind::Rules => Box::new(RuleExtractor::builder().max_input_len(config.extractor_max_input).build()),
    ExtractorKind::None => Box::new(Unavailable),
  };

  let normalizer = match &config.abbreviations_path {
    Some(path) => Normalizer::new(lemmatizer, extractor).abbreviations(Abbreviations::from_yaml(&read_dictionary(path)?)?).build(),
    None => Normalizer::new(lemmatizer, extractor).build(),
  };

  tracing::info!(extractor = ?config.extractor, lemmas = normalizer.lemmatizer().len(), "address matcher initialized");

  Ok(Matcher::new(normalizer))
}

fn read_dictionary(path: &str) -> Result<Vec<u8>, AppError> {
  std::fs::read(path).map_err(|err| AppError::ConfigError(format!("could not read dictionary at {path}: {err}")))
}

pub fn routes(config: &Config) -> anyhow::Result<Router> {
  let prometheus = match config.enable_prometheus {
    true => Some(build_prometheus()?),
    false => None,
  };

  let state = AppState {
    config: config.clone(),
    prometheus,
    matcher: Arc::new(build_matcher(config)?),
  };

  Ok(router(state))
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/compare", post(handlers::compare))
    .route("/compare/batch", post(handlers::compare_batch))
    .fallback(handlers::not_found)
    .layer(middleware::from_fn(middlewares::metrics))
    .layer(middleware::from_fn(middlewares::logging::api_logger))
    .layer(TraceLayer::new_for_http().make_span_with(middlewares::create_request_span))
    // The routes below will not go through the observability middlewares above
    .route("/health", get(handlers::health))
    .route("/healthz", get(handlers::healthz))
    .route("/metrics", get(handlers::prometheus))
    .layer(middleware::from_fn(middlewares::request_id))
    .with_state(state)
}
