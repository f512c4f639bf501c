//! Shared helpers for integration tests: a one-shot HTTP responder and an
//! isolated config/cache layout.

#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Serves a single canned HTTP response on a local port
pub struct TestServer {
    pub url: String,
    requests: mpsc::Receiver<String>,
}

impl TestServer {
    /// Responds to the first request with `status` (e.g. "200 OK") and `body`
    pub fn respond(status: &str, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        Self::spawn(move |mut stream| {
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        })
    }

    /// Accepts the first request and holds it open without answering
    pub fn stall(hold: Duration) -> Self {
        Self::spawn(move |_stream| thread::sleep(hold))
    }

    fn spawn<F>(handler: F) -> Self
    where
        F: FnOnce(TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let port = listener.local_addr().expect("local addr").port();
        let (tx, requests) = mpsc::channel();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request_head(&mut stream);
                let _ = tx.send(request);
                handler(stream);
            }
        });

        Self {
            url: format!("http://127.0.0.1:{}/facts", port),
            requests,
        }
    }

    /// Returns the raw request head the server received
    pub fn received_request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("server should have received a request")
    }
}

fn read_request_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// URL on a local port nothing listens on
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/facts", port)
}

/// Temporary config and cache locations
pub struct TestEnv {
    _tmp: TempDir,
    pub config: PathBuf,
    pub cache: PathBuf,
}

impl TestEnv {
    /// Creates a config pointing at `url`; the cache directory does not exist yet
    pub fn new(url: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let config = tmp.path().join("etc").join("config.json");
        fs::create_dir_all(config.parent().unwrap()).expect("create config dir");
        fs::write(&config, format!("{{\"url\": \"{}\"}}", url)).expect("write config");
        let cache = tmp.path().join("var").join("cache").join("facts.txt");

        Self {
            _tmp: tmp,
            config,
            cache,
        }
    }

    /// Writes raw content to the cache path, creating its directory
    pub fn seed_cache(&self, content: &str) {
        fs::create_dir_all(self.cache.parent().unwrap()).expect("create cache dir");
        fs::write(&self.cache, content).expect("write cache");
    }

    pub fn read_cache(&self) -> String {
        fs::read_to_string(&self.cache).expect("read cache")
    }
}
