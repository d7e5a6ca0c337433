#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use topscorers_etl::config::{ApiConfig, Config, DatabaseConfig, QueryConfig};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// A canned HTTP reply served to one connection.
pub struct Reply {
    pub status: &'static str,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: "200 OK",
            headers: vec![("Content-Type", "application/json")],
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            ..Self::ok(body)
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Serves one reply per accepted connection, in order, then stops.
/// Joining the handle yields the raw request heads it received.
pub fn serve(replies: Vec<Reply>) -> (SocketAddr, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local responder");
    let addr = listener.local_addr().expect("responder address");
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for reply in replies {
            let Ok((mut stream, _)) = listener.accept() else {
                break;
            };
            seen.push(read_head(&mut stream));
            thread::sleep(reply.delay);
            let mut out = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                reply.status,
                reply.body.len()
            );
            for (name, value) in &reply.headers {
                out.push_str(&format!("{name}: {value}\r\n"));
            }
            out.push_str("\r\n");
            out.push_str(&reply.body);
            let _ = stream.write_all(out.as_bytes());
            let _ = stream.flush();
        }
        seen
    });
    (addr, handle)
}

fn read_head(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    while !buf.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(1) => buf.push(byte[0]),
            _ => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address nothing is listening on.
pub fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    listener.local_addr().expect("probe address")
}

pub fn config_for(addr: SocketAddr, db_path: &Path) -> Config {
    Config::new(
        ApiConfig {
            base_url: format!("http://{addr}/v3"),
            key: "test-key".to_string(),
            host: "api-football-v1.p.rapidapi.com".to_string(),
            timeout: Duration::from_secs(1),
        },
        QueryConfig {
            league: "39".to_string(),
            season: "2023".to_string(),
        },
        DatabaseConfig {
            path: db_path.to_path_buf(),
        },
    )
}
