use axum::{
  body::Body,
  http::{HeaderName, HeaderValue, Request},
  middleware::Next,
  response::Response,
};
use metrics::counter;
use opentelemetry::global;
use opentelemetry_http::HeaderExtractor;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

pub(crate) mod json_rejection;
pub(crate) mod logging;

pub(crate) static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone, Copy, Debug)]
pub(crate) struct RequestId(pub Uuid);

/// Reuse the caller's `x-request-id` when it is a UUID, mint one otherwise,
/// and echo it back on the response.
pub(crate) async fn request_id(mut request: Request<Body>, next: Next) -> Response {
  let request_id = request
    .headers()
    .get(&REQUEST_ID_HEADER)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| Uuid::parse_str(value).ok())
    .map(RequestId)
    .unwrap_or_else(|| RequestId(Uuid::new_v4()));

  request.extensions_mut().insert(request_id);

  let mut response = next.run(request).await;

  if let Ok(value) = HeaderValue::from_str(&request_id.0.to_string()) {
    response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
  }

  response
}

/// Bounded label for the endpoint a request was aimed at.
pub(crate) fn endpoint(path: &str) -> &'static str {
  match path {
    "/compare" => "compare",
    "/compare/batch" => "compare_batch",
    _ => "other",
  }
}

pub(super) async fn metrics(request: Request<Body>, next: Next) -> Response {
  let endpoint = endpoint(request.uri().path());
  let response = next.run(request).await;

  counter!("http_requests_total", "endpoint" => endpoint, "status" => response.status().as_u16().to_string()).increment(1);

  response
}

pub(crate) fn create_request_span(request: &Request<Body>) -> Span {
  let parent = global::get_text_map_propagator(|propagator| propagator.extract(&HeaderExtractor(request.headers())));
  let request_id = request.extensions().get::<RequestId>().map(|id| id.0).unwrap_or_else(Uuid::new_v4);
  let span = tracing::info_span!("request", request_id = %request_id, endpoint = endpoint(request.uri().path()));

  let _ = span.set_parent(parent);
  span
}

#[cfg(test)]
mod tests {
  #[test]
  fn endpoints() {
    assert_eq!(super::endpoint("/compare"), "compare");
    assert_eq!(super::endpoint("/compare/batch"), "compare_batch");
    assert_eq!(super::endpoint("/compare/batch/extra"), "other");
    assert_eq!(super::endpoint("/"), "other");
  }
}
