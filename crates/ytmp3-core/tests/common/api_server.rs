//! Minimal scripted HTTP/1.1 server emulating the download backend.
//!
//! Serves the REST endpoints the client consumes. Progress responses are
//! scripted: each poll consumes the next entry, the last one repeats. The
//! first `progress_garbage` polls answer with an undecodable body so tests
//! can exercise the poller's retry-on-transport-error policy.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Scripted backend behavior for one test.
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub download_id: String,
    /// `total` returned by start-download (single jobs).
    pub start_total: u64,
    /// When set, start endpoints answer with this status and JSON body.
    pub fail_start: Option<(u16, serde_json::Value)>,
    /// Progress bodies served in order; the last entry repeats.
    pub progress: Vec<serde_json::Value>,
    /// Number of initial progress polls answered with garbage.
    pub progress_garbage: usize,
    pub artifact_bytes: Vec<u8>,
    pub content_disposition: Option<String>,
    /// When set, the artifact endpoint answers with this status and body.
    pub fail_artifact: Option<(u16, serde_json::Value)>,
    /// Full response body for `/api/search`.
    pub search_results: serde_json::Value,
    /// Full response body for `/api/playlist-info`.
    pub playlist_info: serde_json::Value,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            download_id: "abc".to_string(),
            start_total: 1,
            fail_start: None,
            progress: vec![serde_json::json!({
                "status": "complete", "current": 1, "message": "done"
            })],
            progress_garbage: 0,
            artifact_bytes: b"mp3-bytes".to_vec(),
            content_disposition: Some("attachment; filename=\"Song.mp3\"".to_string()),
            fail_artifact: None,
            search_results: serde_json::json!({ "results": [] }),
            playlist_info: serde_json::json!({ "videos": [], "total": 0 }),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    progress_served: usize,
    garbage_served: usize,
}

/// Starts the server in a background thread. Returns the base URL.
pub fn start(backend: MockBackend) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let backend = Arc::new(backend);
    let counters = Arc::new(Mutex::new(Counters::default()));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let backend = Arc::clone(&backend);
            let counters = Arc::clone(&counters);
            thread::spawn(move || handle(stream, &backend, &counters));
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn handle(mut stream: TcpStream, backend: &MockBackend, counters: &Mutex<Counters>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf: Vec<u8> = Vec::new();
    // Keep-alive loop: one iteration per request on this connection.
    loop {
        let headers_end = loop {
            if let Some(pos) = find_terminator(&buf) {
                break pos;
            }
            let mut chunk = [0u8; 4096];
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        };
        let head = String::from_utf8_lossy(&buf[..headers_end]).into_owned();
        let body_len = content_length(&head);
        while buf.len() < headers_end + body_len {
            let mut chunk = [0u8; 4096];
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        buf.drain(..headers_end + body_len);

        let mut parts = head.split_whitespace();
        let method = parts.next().unwrap_or("").to_string();
        let path = parts.next().unwrap_or("").to_string();
        let response = route(&method, &path, backend, counters);
        if stream.write_all(&response).is_err() {
            return;
        }
    }
}

fn route(method: &str, path: &str, backend: &MockBackend, counters: &Mutex<Counters>) -> Vec<u8> {
    match (method, path) {
        ("POST", "/api/start-download") => match &backend.fail_start {
            Some((status, body)) => json_response(*status, body),
            None => json_response(
                200,
                &serde_json::json!({
                    "download_id": backend.download_id,
                    "total": backend.start_total,
                }),
            ),
        },
        ("POST", "/api/start-batch-download") => match &backend.fail_start {
            Some((status, body)) => json_response(*status, body),
            None => json_response(
                200,
                &serde_json::json!({ "download_id": backend.download_id }),
            ),
        },
        ("POST", "/api/search") => json_response(200, &backend.search_results),
        ("POST", "/api/playlist-info") => json_response(200, &backend.playlist_info),
        ("GET", p) if p.starts_with("/api/progress/") => {
            let mut c = counters.lock().unwrap();
            if c.garbage_served < backend.progress_garbage {
                c.garbage_served += 1;
                return raw_response(200, "application/json", b"{ this is not json", &[]);
            }
            let idx = c.progress_served.min(backend.progress.len().saturating_sub(1));
            c.progress_served += 1;
            json_response(200, &backend.progress[idx])
        }
        ("GET", p) if p.starts_with("/api/download/") => match &backend.fail_artifact {
            Some((status, body)) => json_response(*status, body),
            None => {
                let extra: Vec<(String, String)> = backend
                    .content_disposition
                    .iter()
                    .map(|cd| ("Content-Disposition".to_string(), cd.clone()))
                    .collect();
                let extra_refs: Vec<(&str, &str)> = extra
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                raw_response(
                    200,
                    "application/octet-stream",
                    &backend.artifact_bytes,
                    &extra_refs,
                )
            }
        },
        _ => json_response(404, &serde_json::json!({ "error": "not found" })),
    }
}

fn json_response(status: u16, body: &serde_json::Value) -> Vec<u8> {
    let body = body.to_string().into_bytes();
    raw_response(status, "application/json", &body, &[])
}

fn raw_response(
    status: u16,
    content_type: &str,
    body: &[u8],
    extra_headers: &[(&str, &str)],
) -> Vec<u8> {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Error",
    };
    let mut out = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n",
        body.len()
    );
    for (name, value) in extra_headers {
        out.push_str(&format!("{name}: {value}\r\n"));
    }
    out.push_str("\r\n");
    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

/// Byte offset just past the `\r\n\r\n` header terminator, if present.
fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

fn content_length(head: &str) -> usize {
    for line in head.lines() {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                return value.trim().parse().unwrap_or(0);
            }
        }
    }
    0
}
