//! Inbound webhook listener.

use std::convert::Infallible;
use std::net::SocketAddr;

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use saldo_core::WebhookPayload;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::tracker::TrackerMessage;

/// Bind the listener and spawn it onto the runtime. Returns the bound
/// address so callers may configure port 0.
pub fn spawn(
    addr: SocketAddr,
    tx: mpsc::Sender<TrackerMessage>,
) -> hyper::Result<(SocketAddr, JoinHandle<hyper::Result<()>>)> {
    let make_svc = make_service_fn(move |_| {
        let tx = tx.clone();
        async move { Ok::<_, Infallible>(service_fn(move |req| handle(req, tx.clone()))) }
    });
    let server = Server::try_bind(&addr)?.serve(make_svc);
    let local_addr = server.local_addr();
    info!(%local_addr, "webhook listener started");
    Ok((local_addr, tokio::spawn(server)))
}

/// Every delivery is acknowledged with 204 No Content; application happens
/// on the tracker side of the channel after the response is decided. A
/// malformed body is logged and dropped, never fatal.
async fn handle(
    req: Request<Body>,
    tx: mpsc::Sender<TrackerMessage>,
) -> Result<Response<Body>, Infallible> {
    match hyper::body::to_bytes(req.into_body()).await {
        Ok(body) => {
            if let Some(message) = decode_delivery(&body) {
                if tx.send(message).await.is_err() {
                    warn!("tracker is gone; dropping delivery");
                }
            }
        }
        Err(err) => warn!(error = %err, "failed to read delivery body"),
    }
    Ok(no_content())
}

fn decode_delivery(body: &[u8]) -> Option<TrackerMessage> {
    let payload = match WebhookPayload::from_slice(body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "discarding malformed delivery");
            return None;
        }
    };
    let kind = payload.kind.clone();
    match payload.into_update() {
        Ok(Some(update)) => Some(TrackerMessage::Update(update)),
        Ok(None) => {
            debug!(%kind, "delivery kind carries no balance change");
            Some(TrackerMessage::Touch)
        }
        Err(err) => {
            warn!(error = %err, "discarding malformed statement payload");
            None
        }
    }
}

fn no_content() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}
