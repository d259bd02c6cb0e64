
use std::sync::Arc;

use crate::api::{AppState, build_matcher, config::Config};

pub(super) fn state(config: Config) -> AppState {
  AppState {
    matcher: Arc::new(build_matcher(&config).unwrap()),
    prometheus: None,
    config,
  }
}
