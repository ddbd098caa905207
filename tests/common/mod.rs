//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

use wikispace::origin::{Fetch, FetchError, FetchResult};
use wikispace::ProxyConfig;

/// One canned origin response.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl MockReply {
    pub fn ok(content_type: &str, body: &str) -> Self {
        Self {
            status: 200,
            headers: vec![("Content-Type".into(), content_type.into())],
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: b"upstream failure".to_vec(),
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            status: 302,
            headers: vec![("Location".into(), location.into())],
            body: Vec::new(),
        }
    }
}

/// Raw request heads seen by a mock origin.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a programmable mock origin on an ephemeral port.
///
/// `f` receives the request path (with query) and returns the reply.
pub async fn start_origin<F, Fut>(f: F) -> (SocketAddr, RequestLog)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockReply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = log.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let head = read_head(&mut socket).await;
                let path = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                seen.lock().unwrap().push(head);

                let reply = f(path).await;
                let mut response = format!("HTTP/1.1 {} Mock\r\n", reply.status);
                for (name, value) in &reply.headers {
                    response.push_str(&format!("{name}: {value}\r\n"));
                }
                response.push_str(&format!(
                    "Content-Length: {}\r\nConnection: close\r\n\r\n",
                    reply.body.len()
                ));

                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.write_all(&reply.body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, log)
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

type Script = dyn Fn(&Url) -> Result<FetchResult, FetchError> + Send + Sync;

/// In-memory fetcher that answers from a script and records every call.
pub struct FakeFetcher {
    script: Box<Script>,
    calls: Mutex<Vec<Url>>,
}

impl FakeFetcher {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(&Url) -> Result<FetchResult, FetchError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Always answers with `body` under `content_type`.
    pub fn serving(content_type: Option<&str>, body: &str) -> Arc<Self> {
        let content_type = content_type.map(str::to_string);
        let body = Bytes::from(body.to_string());
        Self::new(move |url| {
            Ok(FetchResult {
                bytes: body.clone(),
                content_type: content_type.clone(),
                resolved_url: url.clone(),
            })
        })
    }

    /// Always fails with an upstream status.
    pub fn failing(status: u16) -> Arc<Self> {
        Self::new(move |url| {
            Err(FetchError::UpstreamStatus {
                url: url.to_string(),
                status,
            })
        })
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for FakeFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchError> {
        self.calls.lock().unwrap().push(url.clone());
        (self.script)(url)
    }
}

/// Defaults with a retry delay short enough for tests.
pub fn test_config() -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.retries.delay_ms = 1;
    config
}

/// Send one GET through the router.
pub async fn get(router: Router, uri: &str) -> Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
