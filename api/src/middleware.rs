use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};
use tracing::info;

/// Logs method, path, client address, user-agent, status and latency of every
/// request. CORS preflight `OPTIONS` requests are passed through silently.
///
/// The client address is only known when the server was started with
/// `into_make_service_with_connect_info::<SocketAddr>()`; otherwise it is logged as `-`.
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".into());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let started = Instant::now();
    let response = next.run(req).await;

    info!(
        %method,
        path,
        ip,
        user_agent,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );

    response
}
