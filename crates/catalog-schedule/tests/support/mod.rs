//! In-process stand-in for the catalog API.
//!
//! Speaks just enough HTTP/1.1 for reqwest: reads the request head, answers
//! with a canned status and body, then closes the connection.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone)]
struct Route {
    status: u16,
    body: String,
    delay: Duration,
}

#[derive(Default)]
pub struct StubCatalog {
    routes: HashMap<String, Route>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `GET path` with `status` and `body`.
    pub fn route(mut self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status,
                body: body.into(),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Hold the response for `path` back by `delay`.
    pub fn delayed(mut self, path: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(path) {
            route.delay = delay;
        }
        self
    }

    /// Bind an ephemeral port and serve until the test runtime shuts down.
    /// Returns the base URL.
    pub async fn start(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let routes = Arc::new(self.routes);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                tokio::spawn(async move {
                    let _ = serve(stream, &routes).await;
                });
            }
        });

        format!("http://{}", addr)
    }
}

async fn serve(mut stream: TcpStream, routes: &HashMap<String, Route>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let route = routes.get(&path).cloned().unwrap_or(Route {
        status: 404,
        body: r#"{"detail":"Not Found"}"#.to_string(),
        delay: Duration::ZERO,
    });

    if !route.delay.is_zero() {
        tokio::time::sleep(route.delay).await;
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{}",
        route.status,
        reason(route.status),
        route.body.len(),
        route.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    format!("http://{}", addr)
}

pub const CATALOG_JSON: &str = r#"[
    {"codigo": "MAT101", "nombre": "Cálculo I", "creditos": 4, "docente": "Ana Ruiz"},
    {"codigo": "FIS202", "nombre": "Física II", "creditos": 3},
    {"codigo": "INF110", "nombre": "Programación", "creditos": 4}
]"#;

pub const MAT101_JSON: &str = r#"{
    "codigo": "MAT101",
    "nombre": "Cálculo I",
    "grupos": [
        {
            "nombre": "A",
            "docente": "Ana Ruiz",
            "cupos": 30,
            "sesiones": [
                {"dia": "Lunes", "hora_inicio": "08:00", "hora_fin": "10:00", "salon": "B-201"}
            ]
        },
        {
            "nombre": "B",
            "sesiones": [
                {"dia": "Martes", "hora_inicio": "14:00", "hora_fin": "16:00"}
            ]
        }
    ]
}"#;

/// Detail body with one group meeting on `day` from `start` to `end`.
pub fn detail_json(code: &str, name: &str, day: &str, start: &str, end: &str) -> String {
    let session =
        format!(r#"{{"dia": "{day}", "hora_inicio": "{start}", "hora_fin": "{end}"}}"#);
    let group = format!(r#"{{"nombre": "A", "sesiones": [{session}]}}"#);
    format!(r#"{{"codigo": "{code}", "nombre": "{name}", "grupos": [{group}]}}"#)
}
