use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Canned response for one request path.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// When set, the body is written one byte at a time with this pause before each byte.
    pub byte_delay: Option<Duration>,
}

impl Route {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            byte_delay: None,
        }
    }

    pub fn trickle(body: &[u8], byte_delay: Duration) -> Self {
        Self {
            byte_delay: Some(byte_delay),
            ..Self::ok(body)
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

type Routes = Arc<Mutex<HashMap<String, Route>>>;
type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Minimal HTTP/1.1 server on a loopback port. Unknown paths answer 404.
pub struct TestServer {
    base_url: String,
    routes: Routes,
    requests: RequestLog,
}

impl TestServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let routes = Routes::default();
        let requests = RequestLog::default();

        let (accept_routes, accept_log) = (routes.clone(), requests.clone());
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let (routes, log) = (accept_routes.clone(), accept_log.clone());
                tokio::spawn(async move {
                    let _ = serve(stream, routes, log).await;
                });
            }
        });

        Ok(Self {
            base_url,
            routes,
            requests,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn route(&self, path: &str, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert(path.to_string(), route);
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

async fn serve(mut stream: TcpStream, routes: Routes, log: RequestLog) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            return Ok(());
        }
        head.extend_from_slice(&buf[..read]);
    }

    let head = String::from_utf8_lossy(&head).into_owned();
    let mut lines = head.split("\r\n");
    let path = lines
        .next()
        .and_then(|line| line.split(' ').nth(1))
        .unwrap_or("/")
        .to_string();
    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .collect();

    let route = lookup(&routes, &path);
    record(&log, RecordedRequest { path, headers });

    let route = route.unwrap_or(Route {
        status: 404,
        body: br#"{"message":"Not Found"}"#.to_vec(),
        byte_delay: None,
    });
    let reason = if route.status < 400 { "OK" } else { "Error" };
    let response_head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason,
        route.body.len()
    );
    stream.write_all(response_head.as_bytes()).await?;

    match route.byte_delay {
        Some(delay) => {
            for byte in &route.body {
                tokio::time::sleep(delay).await;
                stream.write_all(std::slice::from_ref(byte)).await?;
                stream.flush().await?;
            }
        }
        None => stream.write_all(&route.body).await?,
    }
    stream.shutdown().await
}

fn lookup(routes: &Routes, path: &str) -> Option<Route> {
    routes.lock().ok().and_then(|routes| routes.get(path).cloned())
}

fn record(log: &RequestLog, request: RecordedRequest) {
    if let Ok(mut requests) = log.lock() {
        requests.push(request);
    }
}
