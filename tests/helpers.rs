// Shared test helpers: loopback fake servers and short-timeout configs.
//
// Each integration test file pulls this in with `mod helpers;` and uses a
// subset, hence the `dead_code` allowances.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use endpoint_resolver::Config;
use hickory_resolver::proto::op::{Message, MessageType, ResponseCode};
use hickory_resolver::proto::rr::rdata::A;
use hickory_resolver::proto::rr::{RData, Record};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

/// User agent the fake HTTP server accepts in `fast_config()`.
#[allow(dead_code)]
pub const TEST_FALLBACK_USER_AGENT: &str = "fallback-agent/1.0";

/// Config with timeouts small enough for loopback tests.
#[allow(dead_code)]
pub fn fast_config() -> Config {
    Config {
        dns_timeout: Duration::from_millis(500),
        dns_initial_backoff: Duration::from_millis(50),
        dns_max_backoff: Duration::from_millis(100),
        dns_max_elapsed: Duration::from_millis(600),
        port_connect_timeout: Duration::from_millis(500),
        port_passes: 1,
        http_timeout: Duration::from_secs(5),
        fallback_user_agent: TEST_FALLBACK_USER_AGENT.to_string(),
        ..Default::default()
    }
}

/// How the fake DNS server answers.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum DnsMode {
    /// NOERROR with one A record
    Answer(Ipv4Addr),
    /// REFUSED with no records
    Refuse,
}

/// A UDP DNS server on loopback that counts the queries it receives.
#[allow(dead_code)]
pub struct FakeDns {
    pub addr: SocketAddr,
    queries: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FakeDns {
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

/// Starts a fake DNS server. It runs until the test runtime shuts down.
#[allow(dead_code)]
pub async fn start_fake_dns(mode: DnsMode) -> FakeDns {
    let socket = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake DNS socket");
    let addr = socket.local_addr().expect("Failed to read fake DNS address");
    let queries = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&queries);

    tokio::spawn(async move {
        let mut buf = [0u8; 512];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(response) = dns_response(&buf[..len], mode) {
                let _ = socket.send_to(&response, peer).await;
            }
        }
    });

    FakeDns { addr, queries }
}

/// Answers a query according to `mode`, echoing its id and questions.
fn dns_response(query: &[u8], mode: DnsMode) -> Option<Vec<u8>> {
    let request = Message::from_vec(query).ok()?;

    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .add_queries(request.queries().to_vec());

    match mode {
        DnsMode::Answer(ip) => {
            for question in request.queries() {
                response.add_answer(Record::from_rdata(
                    question.name().clone(),
                    60,
                    RData::A(A(ip)),
                ));
            }
        }
        DnsMode::Refuse => {
            response.set_response_code(ResponseCode::Refused);
        }
    }
    response.to_vec().ok()
}

/// Starts an HTTP server that answers 200 only to `allowed_user_agent`.
///
/// Any other request, TLS handshakes included, gets its connection dropped
/// without a response. Returns the listening port.
#[allow(dead_code)]
pub async fn start_user_agent_filtering_server(allowed_user_agent: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind HTTP listener");
    let port = listener
        .local_addr()
        .expect("Failed to read HTTP listener address")
        .port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_if_allowed(stream, allowed_user_agent));
        }
    });

    port
}

async fn serve_if_allowed(mut stream: TcpStream, allowed_user_agent: &str) {
    let head = tokio::time::timeout(Duration::from_millis(500), read_head(&mut stream))
        .await
        .unwrap_or_default();
    let expected = format!("user-agent: {}", allowed_user_agent.to_ascii_lowercase());
    let allowed = head
        .to_ascii_lowercase()
        .lines()
        .any(|line| line.trim_end() == expected);

    if allowed {
        let _ = stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok")
            .await;
        let _ = stream.shutdown().await;
    }
}

async fn read_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// Returns a loopback port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let port = listener
        .local_addr()
        .expect("Failed to read listener address")
        .port();
    drop(listener);
    port
}
