use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use prometheus::Encoder;

use crate::metrics::REGISTRY;

pub async fn metrics_handler() -> Response {
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        log::error!("Could not encode custom metrics: {}", e);
    };
    let mut res = String::from_utf8(buffer).unwrap_or_else(|e| {
        log::error!("Custom metrics could not be from_utf8'd: {}", e);
        String::default()
    });

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        log::error!("Could not encode prometheus metrics: {}", e);
    };
    let res_custom = String::from_utf8(buffer).unwrap_or_else(|e| {
        log::error!("Prometheus metrics could not be from_utf8'd: {}", e);
        String::default()
    });

    res.push_str(&res_custom);

    (StatusCode::OK, res).into_response()
}
