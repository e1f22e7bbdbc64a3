//! Scripted HTTP backend for tests.
//!
//! A hand-rolled HTTP/1.1 responder on a loopback `TcpListener`. Routes are
//! matched on method and path (or path plus query when the route includes
//! one); each route serves its queued responses in order and keeps repeating
//! the last one. Unmatched requests get a 404.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Canned answer.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
    /// Content-Length to announce instead of the real body length.
    pub declared_length: Option<usize>,
}

impl MockResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
            declared_length: None,
        }
    }

    /// `200 {"code":"SUCCESS","data":...}`
    pub fn success(data: serde_json::Value) -> Self {
        Self::json(
            200,
            serde_json::json!({ "code": "SUCCESS", "message": "성공", "data": data }),
        )
    }

    /// `200` page envelope.
    pub fn page(content: serde_json::Value, total_elements: u64) -> Self {
        Self::success(serde_json::json!({
            "content": content,
            "totalElements": total_elements,
        }))
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
            declared_length: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Announce more body than is sent, so reading the body fails.
    pub fn truncated(mut self) -> Self {
        self.declared_length = Some(self.body.len() + 64);
        self
    }
}

/// A request the server received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Lower-cased header names.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

struct Route {
    method: String,
    target: String,
    responses: VecDeque<MockResponse>,
}

#[derive(Default)]
struct ServerState {
    routes: Vec<Route>,
    requests: Vec<RecordedRequest>,
}

impl ServerState {
    fn next_response(&mut self, method: &str, path: &str, query: Option<&str>) -> MockResponse {
        let full = match query {
            Some(q) => format!("{}?{}", path, q),
            None => path.to_string(),
        };
        let index = self
            .routes
            .iter()
            .position(|r| r.method == method && r.target == full)
            .or_else(|| {
                self.routes
                    .iter()
                    .position(|r| r.method == method && r.target == path)
            });

        match index.map(|i| &mut self.routes[i]) {
            Some(route) if route.responses.len() > 1 => {
                route.responses.pop_front().unwrap_or_else(not_found)
            }
            Some(route) => route.responses.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> MockResponse {
    MockResponse::json(404, serde_json::json!({ "message": "no route" }))
}

pub struct MockServer {
    base_url: String,
    state: Arc<Mutex<ServerState>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState::default()));

        let handle = tokio::spawn({
            let state = state.clone();
            async move {
                loop {
                    match listener.accept().await {
                        Ok((socket, _)) => {
                            let state = state.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(socket, state).await {
                                    error!("Mock server connection error: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Mock server accept error: {}", e);
                            break;
                        }
                    }
                }
            }
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        })
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Queue a response for `method target`. `target` may carry a query
    /// (`/v1/tags?no=2`), in which case it only matches that query.
    pub fn on(&self, method: &str, target: &str, response: MockResponse) -> &Self {
        let mut state = self.state.lock();
        let existing = state
            .routes
            .iter()
            .position(|r| r.method == method && r.target == target);
        match existing {
            Some(i) => state.routes[i].responses.push_back(response),
            None => state.routes.push(Route {
                method: method.to_string(),
                target: target.to_string(),
                responses: VecDeque::from([response]),
            }),
        }
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of requests received for `method path`, any query.
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_request(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    state: Arc<Mutex<ServerState>>,
) -> std::io::Result<()> {
    let (reader, mut writer) = socket.split();
    let mut reader = BufReader::new(reader);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await?;

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.clone(), None),
    };
    debug!(method = %method, target = %target, "Mock server request");

    let response = {
        let mut state = state.lock();
        let response = state.next_response(&method, &path, query.as_deref());
        state.requests.push(RecordedRequest {
            method,
            path,
            query,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
        response
    };

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.declared_length.unwrap_or(response.body.len()),
    );
    writer.write_all(head.as_bytes()).await?;
    writer.write_all(response.body.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
