//! Prober classification tests against a loopback HTTP server.
//!
//! A raw `TcpListener` stands in for the probed sites so transport-level
//! behaviours (dropped HEAD connections, stalls, refused connections) can
//! be scripted precisely. Probers use a short budget to keep the suite
//! fast; the stall duration is always well past that budget.

use std::time::Duration;

use linkdock_checker::LinkProber;
use linkdock_core::check::{CheckStatus, LinkItem};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How each accepted connection behaves.
#[derive(Clone, Copy)]
enum Behaviour {
    /// Respond with this status to any method.
    Respond(u16),
    /// Drop HEAD connections without a response; answer GET with 200.
    DropHeadServeGet,
    /// Drop every connection without a response.
    DropAll,
    /// Drop HEAD; on GET, stall past any reasonable budget, then answer.
    DropHeadStallGet,
    /// Stall every request past any reasonable budget.
    StallAll,
}

const STALL: Duration = Duration::from_secs(5);

/// Spawn a scripted one-behaviour HTTP server; returns its base URL.
async fn spawn_server(behaviour: Behaviour) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(handle(stream, behaviour));
        }
    });
    format!("http://{addr}")
}

async fn handle(mut stream: TcpStream, behaviour: Behaviour) {
    let mut buf = [0u8; 1024];
    let n = stream.read(&mut buf).await.unwrap_or(0);
    let is_head = buf[..n].starts_with(b"HEAD ");

    match behaviour {
        Behaviour::Respond(status) => respond(&mut stream, status).await,
        Behaviour::DropAll => drop(stream),
        Behaviour::DropHeadServeGet => {
            if is_head {
                drop(stream);
            } else {
                respond(&mut stream, 200).await;
            }
        }
        Behaviour::DropHeadStallGet => {
            if is_head {
                drop(stream);
            } else {
                tokio::time::sleep(STALL).await;
                respond(&mut stream, 200).await;
            }
        }
        Behaviour::StallAll => {
            tokio::time::sleep(STALL).await;
            respond(&mut stream, 200).await;
        }
    }
}

async fn respond(stream: &mut TcpStream, status: u16) {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn item(url: &str) -> LinkItem {
    LinkItem {
        id: 1,
        name: "test".into(),
        url: url.into(),
    }
}

fn fast_prober() -> LinkProber {
    LinkProber::with_timeout(Duration::from_millis(500)).unwrap()
}

#[tokio::test]
async fn successful_head_classifies_as_live() {
    let base = spawn_server(Behaviour::Respond(200)).await;
    let result = fast_prober().probe(&item(&base)).await;

    assert_eq!(result.status, CheckStatus::Live);
    assert_eq!(result.status_code, Some(200));
    assert!(result.error_detail.is_none());
}

#[tokio::test]
async fn error_status_classifies_as_dead_with_the_code() {
    let base = spawn_server(Behaviour::Respond(404)).await;
    let result = fast_prober().probe(&item(&base)).await;

    assert_eq!(result.status, CheckStatus::Dead);
    assert_eq!(result.status_code, Some(404));
    assert!(result.error_detail.as_deref().unwrap().contains("404"));
}

#[tokio::test]
async fn dropped_head_falls_back_to_get() {
    let base = spawn_server(Behaviour::DropHeadServeGet).await;
    let result = fast_prober().probe(&item(&base)).await;

    assert_eq!(result.status, CheckStatus::Live);
    assert_eq!(result.status_code, Some(200));
}

#[tokio::test]
async fn failing_both_attempts_classifies_as_dead_with_detail() {
    let base = spawn_server(Behaviour::DropAll).await;
    let result = fast_prober().probe(&item(&base)).await;

    assert_eq!(result.status, CheckStatus::Dead);
    assert_eq!(result.status_code, None);
    assert!(result.error_detail.is_some());
}

#[tokio::test]
async fn stalled_probe_classifies_as_timed_out() {
    let base = spawn_server(Behaviour::StallAll).await;
    let result = fast_prober().probe(&item(&base)).await;

    assert_eq!(result.status, CheckStatus::TimedOut);
    assert_eq!(result.status_code, None);
    assert!(result.error_detail.is_some());
}

#[tokio::test]
async fn the_budget_spans_the_fallback_attempt() {
    // HEAD fails fast, the GET fallback stalls: the shared deadline must
    // still bound the pair, classifying the link as timed out rather than
    // waiting out the fallback.
    let base = spawn_server(Behaviour::DropHeadStallGet).await;
    let start = std::time::Instant::now();
    let result = fast_prober().probe(&item(&base)).await;

    assert_eq!(result.status, CheckStatus::TimedOut);
    assert!(
        start.elapsed() < Duration::from_secs(2),
        "fallback must not get a fresh budget"
    );
}

#[tokio::test]
async fn refused_connection_classifies_as_dead() {
    // Bind-then-drop guarantees nothing is listening on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = fast_prober().probe(&item(&format!("http://{addr}"))).await;
    assert_eq!(result.status, CheckStatus::Dead);
    assert!(result.error_detail.is_some());
}

#[tokio::test]
async fn malformed_url_classifies_as_dead() {
    let result = fast_prober().probe(&item("not a url")).await;
    assert_eq!(result.status, CheckStatus::Dead);
    assert!(result.error_detail.is_some());
}

#[tokio::test]
async fn batch_fan_out_settles_every_probe_in_order() {
    let ok = spawn_server(Behaviour::Respond(200)).await;
    let missing = spawn_server(Behaviour::Respond(404)).await;
    let stalled = spawn_server(Behaviour::StallAll).await;

    let items = vec![
        LinkItem { id: 1, name: "a".into(), url: ok },
        LinkItem { id: 2, name: "b".into(), url: missing },
        LinkItem { id: 3, name: "c".into(), url: stalled },
    ];

    let results = fast_prober().probe_batch(&items).await;

    // One slow sibling degrades only itself; the batch settles fully and
    // results come back in slice order.
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].id, 1);
    assert_eq!(results[0].status, CheckStatus::Live);
    assert_eq!(results[1].id, 2);
    assert_eq!(results[1].status, CheckStatus::Dead);
    assert_eq!(results[2].id, 3);
    assert_eq!(results[2].status, CheckStatus::TimedOut);
}
