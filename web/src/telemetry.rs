//! # Telemetry
//!
//! Tracing subscriber setup and per-request logging.

use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` filter.
///
/// A second call is a no-op.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Logs method, route, status and latency of every request.
///
/// Mount with `actix_web::middleware::from_fn(log_request)`.
pub async fn log_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let span = tracing::info_span!(
        "http.request",
        method = %req.method(),
        route = %req.path(),
    );
    let started = Instant::now();

    let res = next.call(req).instrument(span.clone()).await?;

    tracing::info!(
        parent: &span,
        status = res.status().as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "request completed"
    );
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::middleware::from_fn;
    use actix_web::{test as actix_test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_log_request_passes_response_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(log_request))
                .route("/ping", web::get().to(|| async { HttpResponse::Accepted().finish() })),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/ping").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 202);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(LogFormat::Text);
        init(LogFormat::Json);
    }
}
