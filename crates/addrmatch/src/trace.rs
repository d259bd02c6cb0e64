use std::io::Write;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_sdk::{
  Resource,
  propagation::TraceContextPropagator,
  trace::{BatchConfigBuilder, BatchSpanProcessor, Sampler, SdkTracerProvider},
};
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt};

use crate::api::config::{self, Config, Env};

const SERVICE: &str = "addrmatch";

/// Install the global Prometheus recorder.
///
/// Batch sizes are bucketed against the default `MAX_BATCH_SIZE`.
pub fn build_prometheus() -> Result<PrometheusHandle, BuildError> {
  PrometheusBuilder::new()
    .add_global_label("service", SERVICE)
    .set_buckets_for_metric(Matcher::Full("addrmatch_batch_size".into()), &[1.0, 5.0, 10.0, 50.0, 100.0])?
    .install_recorder()
}

/// Keeps log lines flowing and spans exported until dropped.
pub struct TraceGuards {
  _appender: WorkerGuard,
  provider: Option<SdkTracerProvider>,
}

impl Drop for TraceGuards {
  fn drop(&mut self) {
    if let Some(provider) = self.provider.take()
      && let Err(err) = provider.shutdown()
    {
      eprintln!("could not flush pending spans: {err}");
    }
  }
}

pub fn init_tracing(config: &Config, writer: impl Write + Send + 'static) -> TraceGuards {
  let (appender, appender_guard) = tracing_appender::non_blocking(writer);
  let filter = EnvFilter::builder().try_from_env().unwrap_or_else(|_| EnvFilter::new("info"));

  let (provider, exporter, failure) = match span_exporter(config) {
    Ok(Some((provider, layer))) => (Some(provider), Some(layer), None),
    Ok(None) => (None, None, None),
    Err(err) => (None, None, Some(err)),
  };

  global::set_text_map_propagator(TraceContextPropagator::new());

  tracing_subscriber::registry().with(exporter).with(filter).with(formatter(&config.env, appender)).init();

  if let Some(err) = failure {
    tracing::warn!(%err, "could not initialize span exporter, traces will not be exported");
  }

  TraceGuards {
    _appender: appender_guard,
    provider,
  }
}

/// Human-readable lines in development, flattened JSON objects in production.
fn formatter<S>(env: &Env, appender: NonBlocking) -> Box<dyn Layer<S> + Send + Sync>
where
  S: Subscriber + for<'span> LookupSpan<'span>,
{
  match env {
    Env::Production => json_subscriber::layer()
      .with_writer(appender)
      .flatten_event(true)
      .flatten_span_list_on_top_level(true)
      .with_current_span(false)
      .with_span_list(false)
      .boxed(),

    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(cfg!(not(test))).boxed(),
  }
}

type ExporterLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn span_exporter(config: &Config) -> anyhow::Result<Option<(SdkTracerProvider, ExporterLayer)>> {
  if !config.enable_tracing {
    return Ok(None);
  }

  let resource = Resource::builder_empty()
    .with_attributes([KeyValue::new("service.name", SERVICE), KeyValue::new("service.version", env!("CARGO_PKG_VERSION"))])
    .build();

  let processor = BatchSpanProcessor::builder(opentelemetry_otlp::SpanExporter::builder().with_tonic().build()?)
    .with_batch_config(BatchConfigBuilder::default().with_max_queue_size(8192).build())
    .build();

  let provider = SdkTracerProvider::builder()
    .with_sampler(Sampler::TraceIdRatioBased(config::parse_env("OTEL_TRACES_SAMPLER_ARGS", 0.1)?))
    .with_resource(resource)
    .with_span_processor(processor)
    .build();

  let layer = tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE)).boxed();

  Ok(Some((provider, layer)))
}
