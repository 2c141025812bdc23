#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body must be JSON")
    }
}

/// Loopback HTTP/1.1 server answering canned responses by path.
pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<StdMutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub async fn start(routes: Vec<(&str, u16, String)>) -> Self {
        Self::start_with_headers(
            routes
                .into_iter()
                .map(|(path, status, body)| (path, status, Vec::new(), body))
                .collect(),
        )
        .await
    }

    /// Like `start`, but each route also carries extra response headers.
    pub async fn start_with_headers(
        routes: Vec<(&str, u16, Vec<(&str, &str)>, String)>,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let routes: Arc<HashMap<String, (u16, String, String)>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, headers, body)| {
                    let extra: String = headers
                        .into_iter()
                        .map(|(name, value)| format!("{}: {}\r\n", name, value))
                        .collect();
                    (path.to_string(), (status, extra, body))
                })
                .collect(),
        );
        let requests = Arc::new(StdMutex::new(Vec::new()));
        let recorded = requests.clone();

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let (read_half, mut write_half) = stream.into_split();
                    let mut reader = BufReader::new(read_half);

                    let mut request_line = String::new();
                    if reader.read_line(&mut request_line).await.is_err() {
                        return;
                    }
                    let mut parts = request_line.split_whitespace();
                    let method = parts.next().unwrap_or("").to_string();
                    let target = parts.next().unwrap_or("").to_string();
                    let (path, query) = match target.split_once('?') {
                        Some((path, query)) => (path.to_string(), query.to_string()),
                        None => (target.clone(), String::new()),
                    };

                    let mut content_length = 0usize;
                    let mut authorization = None;
                    loop {
                        let mut header = String::new();
                        if reader.read_line(&mut header).await.unwrap_or(0) == 0 {
                            break;
                        }
                        let header = header.trim_end();
                        if header.is_empty() {
                            break;
                        }
                        if let Some((name, value)) = header.split_once(':') {
                            let value = value.trim().to_string();
                            match name.trim().to_ascii_lowercase().as_str() {
                                "content-length" => content_length = value.parse().unwrap_or(0),
                                "authorization" => authorization = Some(value),
                                _ => {}
                            }
                        }
                    }

                    let mut body = vec![0u8; content_length];
                    if content_length > 0 && reader.read_exact(&mut body).await.is_err() {
                        return;
                    }

                    recorded.lock().expect("lock").push(RecordedRequest {
                        method,
                        path: path.clone(),
                        query,
                        authorization,
                        body: String::from_utf8_lossy(&body).to_string(),
                    });

                    let (status, extra, payload) = routes.get(&path).cloned().unwrap_or((
                        404,
                        String::new(),
                        r#"{"detail":"Not found."}"#.to_string(),
                    ));
                    let response = format!(
                        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        extra,
                        payload.len(),
                        payload
                    );
                    let _ = write_half.write_all(response.as_bytes()).await;
                    let _ = write_half.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock").clone()
    }
}
