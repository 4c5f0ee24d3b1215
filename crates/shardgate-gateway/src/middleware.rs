//! HTTP middleware: admission gate, request ids, request logging

use crate::error::ApiError;
use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// The shared admission gate: a single un-keyed token bucket applied
/// to every inbound request
pub type AdmissionGate = governor::DefaultDirectRateLimiter;

/// Create an admission gate with the given refill rate and burst.
///
/// Owned by the composition root and injected as middleware state, so
/// tests can run with independent gates.
pub fn create_admission_gate(requests_per_second: u32, burst: u32) -> Arc<AdmissionGate> {
    let quota = Quota::per_second(NonZeroU32::new(requests_per_second.max(1)).unwrap())
        .allow_burst(NonZeroU32::new(burst.max(1)).unwrap());
    Arc::new(RateLimiter::direct(quota))
}

/// Admission-control middleware
pub async fn rate_limit_middleware(
    State(gate): State<Arc<AdmissionGate>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if gate.check().is_err() {
        return Err(ApiError::RateLimited);
    }
    Ok(next.run(request).await)
}

/// Request ID middleware - adds an x-request-id header
pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Request ID extension
#[derive(Clone)]
pub struct RequestId(pub String);

/// Logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn gate_allows_within_burst() {
        let gate = create_admission_gate(100, 50);
        assert!(gate.check().is_ok());
    }

    #[tokio::test]
    async fn gate_rejects_past_burst_and_recovers() {
        let gate = create_admission_gate(1, 1);
        assert!(gate.check().is_ok());
        assert!(gate.check().is_err());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(gate.check().is_ok());
    }
}
