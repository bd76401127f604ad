// tests/http_transport.rs
// HttpTransport against a minimal in-process HTTP server

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use trip_planner::PlannerError;
use trip_planner::orchestrator::{Orchestrator, Source};
use trip_planner::transport::{HttpTransport, Transport, load_destinations};

/// Read one request (headers plus Content-Length body)
async fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

/// Serve the given responses in order, one per connection, returning the raw requests
async fn mock_backend(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut stream).await);

            let reason = if status == 200 { "OK" } else { "Error" };
            let resp = format!(
                "HTTP/1.1 {} {}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n\
                 {}",
                status,
                reason,
                body.len(),
                body
            );
            stream.write_all(resp.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
        requests
    });

    (format!("http://127.0.0.1:{}", port), server)
}

fn transport(url: &str) -> HttpTransport {
    HttpTransport::new(url, Duration::from_secs(5))
}

#[tokio::test]
async fn post_chat_sends_message_and_session() {
    let body = serde_json::json!({
        "response": "## Paris\nBonjour",
        "context": {"destination": "Paris", "duration_days": 3},
        "session_id": "session-abc"
    })
    .to_string();
    let (url, server) = mock_backend(vec![(200, body)]).await;

    let reply = transport(&url).post_chat("paris for 3 days", "session-abc").await.unwrap();
    assert_eq!(reply.response, "## Paris\nBonjour");
    assert_eq!(reply.trip_context().duration_days, Some(3));

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("POST /api/chat HTTP/1.1"));
    assert!(requests[0].contains("\"message\":\"paris for 3 days\""));
    assert!(requests[0].contains("\"session_id\":\"session-abc\""));
}

#[tokio::test]
async fn error_status_is_transport_unavailable() {
    let body = r#"{"error":"Message is required"}"#.to_string();
    let (url, server) = mock_backend(vec![(400, body)]).await;

    let err = transport(&url).post_chat("x", "s").await.unwrap_err();
    match err {
        PlannerError::TransportUnavailable(msg) => {
            assert!(msg.contains("400"));
            assert!(msg.contains("Message is required"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn truthy_error_in_ok_reply_is_backend_error() {
    let body = r#"{"response":"","error":"agent failed"}"#.to_string();
    let (url, server) = mock_backend(vec![(200, body)]).await;

    let err = transport(&url).post_chat("x", "s").await.unwrap_err();
    assert!(matches!(err, PlannerError::Backend(ref m) if m == "agent failed"));
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_is_transport_unavailable() {
    let (url, server) = mock_backend(vec![(200, "<html>oops</html>".to_string())]).await;
    let err = transport(&url).post_chat("x", "s").await.unwrap_err();
    assert!(matches!(err, PlannerError::TransportUnavailable(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn destinations_from_backend() {
    let body = serde_json::json!({
        "destinations": [
            {"name": "Tokyo", "country": "Japan", "avg_daily_cost": 150},
            {"name": "Lisbon", "country": "Portugal", "avg_daily_cost": 110}
        ],
        "count": 2
    })
    .to_string();
    let (url, server) = mock_backend(vec![(200, body)]).await;

    let http = transport(&url);
    let list = load_destinations(&http).await;
    assert!(list.from_backend);
    assert_eq!(list.destinations.len(), 2);
    assert_eq!(list.destinations[1].to_string(), "Lisbon, Portugal (~$110/day)");

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /api/destinations"));
}

#[tokio::test]
async fn destinations_fall_back_on_server_error() {
    let (url, server) = mock_backend(vec![(500, r#"{"error":"boom"}"#.to_string())]).await;
    let list = load_destinations(&transport(&url)).await;
    assert!(!list.from_backend);
    assert_eq!(list.destinations.len(), 6);
    server.await.unwrap();
}

#[tokio::test]
async fn session_endpoints() {
    let (url, server) = mock_backend(vec![
        (200, r#"{"context":{"destination":"Rome","travelers":3},"session_id":"s1"}"#.to_string()),
        (200, r#"{"status":"reset","session_id":"s1"}"#.to_string()),
        (200, r#"{"status":"healthy","service":"travel-planner","timestamp":"2026-01-01T00:00:00"}"#.to_string()),
    ])
    .await;

    let http = transport(&url);
    let context = http.session_context("s1").await.unwrap();
    assert_eq!(context.destination.as_deref(), Some("Rome"));
    assert_eq!(context.travelers, Some(3));

    http.reset_session("s1").await.unwrap();

    let health = http.health().await.unwrap();
    assert_eq!(health.status, "healthy");

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /api/session/context?session_id=s1"));
    assert!(requests[1].starts_with("POST /api/session/reset"));
    assert!(requests[1].contains("\"session_id\":\"s1\""));
    assert!(requests[2].starts_with("GET /api/health"));
}

#[tokio::test]
async fn slow_backend_times_out_and_simulates() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    // Accept but never answer
    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _ = read_request(&mut stream).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let http = HttpTransport::new(url, Duration::from_millis(300));
    let mut orchestrator = Orchestrator::new(Box::new(http));
    let exchange = orchestrator.submit("what about rome?").await.unwrap();

    assert_eq!(exchange.source, Source::Simulated);
    assert_eq!(exchange.panel.value("Destination"), Some("Rome"));
    server.abort();
}
