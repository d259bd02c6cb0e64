use std::net::SocketAddr;

use axum::{
  body::{Body, HttpBody},
  extract::ConnectInfo,
  http::Request,
  middleware::Next,
  response::Response,
};
use jiff::Timestamp;
use tokio::time::Instant;

/// Attached to comparison responses so the access log can report them.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComparisonOutcome {
  pub pairs: usize,
  pub matches: usize,
}

/// One access log line per request, with the comparison tally when there is one.
pub async fn api_logger(request: Request<Body>, next: Next) -> Response {
  let started = Instant::now();
  let time = Timestamp::now();
  let method = request.method().clone();
  let uri = request.uri().clone();

  let remote = match request.extensions().get::<ConnectInfo<SocketAddr>>() {
    Some(ConnectInfo(addr)) => addr.ip().to_string(),
    None => "-".to_string(),
  };

  let response = next.run(request).await;
  let outcome = response.extensions().get::<ComparisonOutcome>().copied().unwrap_or_default();

  tracing::info!(
    time = %time.strftime("%Y-%m-%dT%H:%M:%S%z"),
    remote = remote.as_str(),
    method = %method,
    path = uri.path(),
    status = response.status().as_u16(),
    pairs = outcome.pairs,
    matches = outcome.matches,
    latency = started.elapsed().as_millis(),
    size = response.size_hint().exact().unwrap_or(0),
    "{method} {uri}",
  );

  response
}
