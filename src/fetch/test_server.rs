//! Minimal HTTP/1.1 responder for exercising the client against canned replies.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) struct CannedResponse {
    status: u16,
    reason: &'static str,
    content_type: &'static str,
    body: String,
}

impl CannedResponse {
    pub(crate) fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: if status == 200 { "OK" } else { "Error" },
            content_type: "application/json",
            body: body.into(),
        }
    }

    pub(crate) fn text(status: u16, reason: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            content_type: "text/plain",
            body: body.into(),
        }
    }

    pub(crate) fn csv(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "text/csv",
            body: body.into(),
        }
    }
}

/// Serve `responses` in order, one per connection. The handle yields each request line.
pub(crate) async fn serve(responses: Vec<CannedResponse>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.expect("accept connection");

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("read request");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let text = String::from_utf8_lossy(&head);
            let request_line = text.lines().next().unwrap_or_default();
            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default();
            let target = parts.next().unwrap_or_default();
            seen.push(format!("{method} {target}"));

            let reply = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                response.reason,
                response.content_type,
                response.body.len(),
                response.body
            );
            socket
                .write_all(reply.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
        }
        seen
    });

    (format!("http://{addr}"), handle)
}
