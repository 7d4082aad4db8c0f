// src/services/requester.rs
use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Client;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::RequestError;
use crate::services::message_board::MessageBoard;
use crate::services::request_id::RequestId;

/// How a demo request ended, plus the line it wrote to the board.
#[derive(Debug)]
pub struct RequestOutcome {
    pub id: RequestId,
    pub line: String,
    pub result: Result<String, RequestError>,
}

impl RequestOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.result, Err(RequestError::Cancelled))
    }
}

/// Issues `GET /example` requests and reports each result on a shared board.
#[derive(Clone, Debug)]
pub struct Requester {
    client: Client,
    base_url: String,
    wait_secs: f64,
    board: MessageBoard,
}

impl Requester {
    pub fn new(base_url: &str, wait_secs: f64, board: MessageBoard) -> Self {
        Self::with_client(Client::new(), base_url, wait_secs, board)
    }

    pub fn with_client(client: Client, base_url: &str, wait_secs: f64, board: MessageBoard) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            wait_secs,
            board,
        }
    }

    pub fn endpoint(&self, id: RequestId) -> String {
        format!("{}/example?wait={}&reqid={}", self.base_url, self.wait_secs, id)
    }

    /// Issue one request, cancelling it after `cancel_after_ms` when that is positive.
    ///
    /// Zero or negative means the request is never cancelled by us. Exactly one
    /// line is appended to the board, whatever the outcome.
    pub async fn make_request(&self, id: RequestId, label: &str, cancel_after_ms: i64) -> RequestOutcome {
        self.run(id, label, cancel_after_ms, CancellationToken::new()).await
    }

    /// Like [`make_request`](Self::make_request) but on its own task, with a
    /// handle that can also cancel it early.
    pub fn spawn_request(&self, id: RequestId, label: impl Into<String>, cancel_after_ms: i64) -> RequestHandle {
        let token = CancellationToken::new();
        let requester = self.clone();
        let label = label.into();
        let task_token = token.clone();

        let join = tokio::spawn(async move {
            requester.run(id, &label, cancel_after_ms, task_token).await
        });

        RequestHandle { id, token, join }
    }

    async fn run(&self, id: RequestId, label: &str, cancel_after_ms: i64, token: CancellationToken) -> RequestOutcome {
        info!("{id}: Starting request ({label}) and cancel after {cancel_after_ms}ms");

        let timer = (cancel_after_ms > 0).then(|| {
            let token = token.clone();
            let delay = Duration::from_millis(cancel_after_ms.unsigned_abs());
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                token.cancel();
            })
        });

        // Dropping the in-flight fetch closes its connection, which is what
        // the server sees as a disconnect.
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(RequestError::Cancelled),
            res = self.fetch(id) => res,
        };

        if let Some(timer) = timer {
            timer.abort();
        }

        let line = match &result {
            Ok(body) => format!("{id}: Success: {body}"),
            Err(err) => format!("{id}: ERROR: {err}"),
        };
        self.board.append(line.clone()).await;

        match &result {
            Ok(_) => info!("{line}"),
            Err(_) => warn!("{line}"),
        }

        RequestOutcome { id, line, result }
    }

    async fn fetch(&self, id: RequestId) -> Result<String, RequestError> {
        let resp = self.client.get(self.endpoint(id)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let text = resp.text().await?;
        Ok(render_body(&text))
    }
}

/// Handle on a request started with [`Requester::spawn_request`].
#[derive(Debug)]
pub struct RequestHandle {
    id: RequestId,
    token: CancellationToken,
    join: JoinHandle<RequestOutcome>,
}

impl RequestHandle {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub async fn outcome(self) -> Result<RequestOutcome, RequestError> {
        Ok(self.join.await?)
    }
}

/// Fire the two page-load requests: one cancelled after a second, one left alone.
pub fn run_demo(requester: &Requester) -> Vec<RequestHandle> {
    vec![
        requester.spawn_request(RequestId::generate(), "Cancel", 1000),
        requester.spawn_request(RequestId::generate(), "Do Not cancel", -1),
    ]
}

/// Run the page-load demo against a server listening on `addr`.
///
/// Traffic to our own loopback address never goes through `HTTP_PROXY`.
pub fn start_local_demo(
    addr: SocketAddr,
    wait_secs: f64,
    board: MessageBoard,
) -> Result<Vec<RequestHandle>, RequestError> {
    let client = Client::builder().no_proxy().build()?;
    let base_url = format!("http://{}", loopback(addr));
    let requester = Requester::with_client(client, &base_url, wait_secs, board);
    Ok(run_demo(&requester))
}

fn loopback(addr: SocketAddr) -> SocketAddr {
    if addr.ip().is_unspecified() {
        SocketAddr::from(([127, 0, 0, 1], addr.port()))
    } else {
        addr
    }
}

// JSON strings are shown unquoted, other JSON as JSON text, anything else raw.
fn render_body(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_has_fixed_shape() {
        let requester = Requester::new("http://localhost:8000/", 5.0, MessageBoard::new());
        assert_eq!(
            requester.endpoint(RequestId::from(17)),
            "http://localhost:8000/example?wait=5&reqid=17"
        );

        let requester = Requester::new("http://localhost:8000", 0.25, MessageBoard::new());
        assert_eq!(
            requester.endpoint(RequestId::from(1)),
            "http://localhost:8000/example?wait=0.25&reqid=1"
        );
    }

    #[test]
    fn unspecified_bind_address_maps_to_loopback() {
        let addr: SocketAddr = "0.0.0.0:8000".parse().unwrap();
        assert_eq!(loopback(addr), "127.0.0.1:8000".parse::<SocketAddr>().unwrap());

        let addr: SocketAddr = "192.168.1.4:8000".parse().unwrap();
        assert_eq!(loopback(addr), addr);
    }

    #[test]
    fn body_rendering() {
        assert_eq!(render_body(r#""12 I waited""#), "12 I waited");
        assert_eq!(render_body(r#"{"a":1}"#), r#"{"a":1}"#);
        assert_eq!(render_body("plain text"), "plain text");
    }

    #[tokio::test]
    async fn unreachable_server_writes_one_error_line() {
        // Grab a free port, then close it again so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let board = MessageBoard::new();
        let client = Client::builder().no_proxy().build().unwrap();
        let requester = Requester::with_client(client, &format!("http://{addr}"), 5.0, board.clone());

        let outcome = requester.make_request(RequestId::from(5), "down", -1).await;
        assert!(outcome.result.is_err());
        assert!(!outcome.is_cancelled());

        let lines = board.lines().await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("5: ERROR: "));
    }
}
