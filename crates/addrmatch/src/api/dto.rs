use libaddrmatch::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct ComparePayload {
  pub address1: String,
  pub address2: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub(crate) struct BatchPair {
  #[validate(length(max = 4096, message = "address1 cannot exceed 4096 characters"))]
  pub address1: String,
  #[validate(length(max = 4096, message = "address2 cannot exceed 4096 characters"))]
  pub address2: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct BatchPayload {
  #[validate(nested, length(min = 1, message = "at least one pair must be provided"))]
  pub pairs: Vec<BatchPair>,
}

#[derive(Serialize)]
pub(super) struct BatchResponse {
  pub results: Vec<MatchResult>,
}

#[derive(Serialize)]
pub(super) struct Health {
  pub status: &'static str,
}
