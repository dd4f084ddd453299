//! Shared utilities for integration testing.

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use resilient_http::{HttpResponse, Transport, TransportError, TransportRequest};

/// Programmable in-process transport: scripted responses plus a call
/// counter, so tests can assert that short-circuited attempts never
/// reach the wire.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: AtomicU32,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and empty body.
    pub fn push_status(&self, status: u16) {
        self.push_response(Ok(ok_response(status)));
    }

    /// Queue a transport-level failure.
    pub fn push_error(&self, error: TransportError) {
        self.push_response(Err(error));
    }

    pub fn push_response(&self, response: Result<HttpResponse, TransportError>) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .push_back(response);
    }

    /// Number of times the transport was actually invoked.
    pub fn calls(&self) -> u32 {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        _request: TransportRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let inner = self.inner.clone();
        async move {
            inner.calls.fetch_add(1, Ordering::SeqCst);
            match inner.responses.lock().unwrap().pop_front() {
                Some(result) => result,
                // Unscripted calls succeed.
                None => Ok(ok_response(200)),
            }
        }
    }
}

#[allow(dead_code)]
pub fn ok_response(status: u16) -> HttpResponse {
    HttpResponse {
        status: StatusCode::from_u16(status).expect("valid status"),
        headers: HeaderMap::new(),
        body: Vec::new(),
    }
}

/// Start a programmable mock backend on an ephemeral port. Each
/// connection is answered with the next (status, body) from `f`.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
