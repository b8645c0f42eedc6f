use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// Request counters
pub static REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new("pix_requests_total", "Total number of requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

pub static CHARGES_CREATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "pix_charges_created_total",
        "Charges successfully relayed to PayEvo",
    )
    .unwrap()
});

pub static LOOKUPS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "pix_lookups_total",
        "Transaction lookups successfully relayed to PayEvo",
    )
    .unwrap()
});

pub static UPSTREAM_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "pix_upstream_failures_total",
        "Requests that failed to reach PayEvo",
    )
    .unwrap()
});

/// Count every handled request by method, path and response status.
/// Wire up with `actix_web::middleware::from_fn(track_requests)`.
pub async fn track_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let method = req.method().to_string();
    let path = req.path().to_string();

    let res = next.call(req).await?;

    REQUESTS_TOTAL
        .with_label_values(&[&method, &path, res.status().as_str()])
        .inc();

    Ok(res)
}

/// Register all metrics with the registry
pub fn register_metrics() {
    REGISTRY.register(Box::new(REQUESTS_TOTAL.clone())).unwrap();
    REGISTRY
        .register(Box::new(CHARGES_CREATED.clone()))
        .unwrap();
    REGISTRY.register(Box::new(LOOKUPS_TOTAL.clone())).unwrap();
    REGISTRY
        .register(Box::new(UPSTREAM_FAILURES.clone()))
        .unwrap();
}
