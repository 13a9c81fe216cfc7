//! Mock monobank API for exercising the Saldo runtime end to end.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde_json::Value;
use tokio::task::JoinHandle;

/// Declarative setup for a [`MockProvider`].
#[derive(Clone, Debug, Default)]
pub struct MockProviderConfig {
    client_info: Option<Value>,
}

impl MockProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON document served from `/personal/client-info`. Without one the
    /// endpoint answers 404, which lets tests exercise the fatal path.
    pub fn with_client_info(mut self, info: Value) -> Self {
        self.client_info = Some(info);
        self
    }
}

#[derive(Debug)]
struct ProviderState {
    client_info: Option<Value>,
    webhook_registrations: Mutex<Vec<String>>,
}

/// In-process provider stub bound to an ephemeral local port. The server is
/// torn down when the value is dropped.
#[derive(Debug)]
pub struct MockProvider {
    addr: SocketAddr,
    state: Arc<ProviderState>,
    handle: JoinHandle<()>,
}

impl MockProvider {
    pub async fn start(config: MockProviderConfig) -> Result<Self> {
        let state = Arc::new(ProviderState {
            client_info: config.client_info,
            webhook_registrations: Mutex::new(Vec::new()),
        });
        let service_state = state.clone();
        let make_svc = make_service_fn(move |_| {
            let state = service_state.clone();
            async move { Ok::<_, Infallible>(service_fn(move |req| handle(state.clone(), req))) }
        });
        let server = Server::try_bind(&SocketAddr::from(([127, 0, 0, 1], 0)))?.serve(make_svc);
        let addr = server.local_addr();
        let handle = tokio::spawn(async move {
            let _ = server.await;
        });
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Webhook URLs received on the registration endpoint, in arrival order.
    pub fn webhook_registrations(&self) -> Vec<String> {
        self.state.webhook_registrations.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    state: Arc<ProviderState>,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let response = match (req.method(), req.uri().path()) {
        (&Method::GET, "/personal/client-info") => match &state.client_info {
            Some(info) => json_response(info),
            None => status_response(StatusCode::NOT_FOUND),
        },
        (&Method::GET, "/personal/webhook") => {
            match req.uri().query().and_then(registered_url) {
                Some(url) => {
                    state.webhook_registrations.lock().unwrap().push(url);
                    json_response(&serde_json::json!({ "status": "ok" }))
                }
                None => status_response(StatusCode::BAD_REQUEST),
            }
        }
        _ => status_response(StatusCode::NOT_FOUND),
    };
    Ok(response)
}

fn registered_url(query: &str) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value)
}

fn json_response(value: &Value) -> Response<Body> {
    let mut response = Response::new(Body::from(value.to_string()));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn status_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
