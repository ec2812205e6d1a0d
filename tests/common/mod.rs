//! A minimal in-process stand-in for the archive's HTTP endpoints.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub type Responder = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct ArchiveServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ArchiveServer {
    /// Serves `respond(path_and_query)` as a 200 response, or a 404 when it returns `None`.
    pub async fn start(respond: Responder) -> ArchiveServer {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let respond = Arc::clone(&respond);
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 4096];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&buf);
                    let target = head
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();
                    seen.lock().unwrap().push(target.clone());

                    let (status, body) = match respond(&target) {
                        Some(body) => ("200 OK", body),
                        None => ("404 Not Found", "not found".to_string()),
                    };
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        ArchiveServer {
            base_url: format!("http://{addr}/webmet/archive"),
            requests,
        }
    }

    /// Request targets (path and query) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Value of query parameter `name` in a request target.
pub fn query_param<'a>(target: &'a str, name: &str) -> Option<&'a str> {
    let query = target.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then_some(value)
    })
}

pub fn wrap(script: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><pujs><![CDATA[AcademaPUJS.set({{{script}}})]]></pujs>"
    )
}
