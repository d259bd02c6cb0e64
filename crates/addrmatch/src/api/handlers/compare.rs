use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Json, extract::State};
use libaddrmatch::prelude::*;
use metrics::histogram;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{BatchPayload, BatchResponse, ComparePayload},
  errors::AppError,
  middlewares::{json_rejection::TypedJson, logging::ComparisonOutcome},
};

#[instrument(skip_all)]
pub async fn compare(State(state): State<AppState>, TypedJson(body): TypedJson<ComparePayload>) -> (Extension<ComparisonOutcome>, Json<MatchResult>) {
  let result = state.matcher.compare(&body.address1, &body.address2);
  let outcome = ComparisonOutcome {
    pairs: 1,
    matches: usize::from(result.is_match),
  };

  (Extension(outcome), Json(result))
}

#[instrument(skip_all)]
pub async fn compare_batch(State(state): State<AppState>, TypedJson(body): TypedJson<BatchPayload>) -> Result<(Extension<ComparisonOutcome>, Json<BatchResponse>), AppError> {
  if body.pairs.len() > state.config.max_batch_size {
    return Err(AppError::ValidationError(vec![format!("at most {} pairs can be compared at once", state.config.max_batch_size)]));
  }

  histogram!("addrmatch_batch_size").record(body.pairs.len() as f64);

  let matcher = Arc::clone(&state.matcher);
  let pairs = body.pairs.into_iter().map(|pair| (pair.address1, pair.address2)).collect::<Vec<_>>();

  let results = tokio::task::spawn_blocking(move || matcher.compare_batch(&pairs)).await.context("batch comparison did not complete")?;

  let outcome = ComparisonOutcome {
    pairs: results.len(),
    matches: results.iter().filter(|result| result.is_match).count(),
  };

  Ok((Extension(outcome), Json(BatchResponse { results })))
}
