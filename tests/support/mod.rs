//! Scripted HTTP stub for sequence-sensitive tests.
//!
//! mockito serves one fixed status per mock, which cannot express "503 twice
//! then 200". This stub serves a scripted list of responses, one per
//! connection, and reports how many requests it actually saw. Responses set
//! `connection: close` so every attempt opens a fresh connection.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

pub struct CannedResponse {
    pub status: u16,
    pub reason: &'static str,
    pub body: String,
}

pub fn canned(status: u16, reason: &'static str, body: &str) -> CannedResponse {
    CannedResponse {
        status,
        reason,
        body: body.to_string(),
    }
}

/// Serve `responses` in order, one per connection, then stop listening.
///
/// Returns the stub's base URL and a handle yielding the number of requests
/// served once the client is done.
pub fn scripted_server(responses: Vec<CannedResponse>) -> (String, JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let base_url = format!("http://{}", listener.local_addr().expect("stub addr"));

    let handle = thread::spawn(move || {
        let mut served = 0;
        for response in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            let _head = read_head(&mut stream);
            write_response(&mut stream, &response);
            served += 1;
        }
        served
    });

    (base_url, handle)
}

/// A stateful stub that tracks a held-set of numeric slot ids.
///
/// Understands the reservation API surface: `GET /reservation` lists holds,
/// `POST /reservation/{id}` adds one, `DELETE /reservation/{id}` removes one.
/// Serves exactly `requests` connections, then returns the final held-set.
pub fn held_set_server(requests: usize) -> (String, JoinHandle<Vec<i64>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let base_url = format!("http://{}", listener.local_addr().expect("stub addr"));

    let handle = thread::spawn(move || {
        let mut held: Vec<i64> = Vec::new();
        for _ in 0..requests {
            let (mut stream, _) = listener.accept().expect("accept");
            let head = read_head(&mut stream);
            let (method, path) = parse_request_line(&head);

            let response = match (method.as_str(), path.as_str()) {
                ("GET", "/reservation") => {
                    let slots: Vec<String> =
                        held.iter().map(|id| format!("{{\"id\":{id}}}")).collect();
                    canned(200, "OK", &format!("[{}]", slots.join(",")))
                }
                ("POST", p) if p.starts_with("/reservation/") => match slot_id(p) {
                    Some(id) => {
                        held.push(id);
                        canned(200, "OK", &format!("{{\"id\":{id}}}"))
                    }
                    None => canned(403, "Forbidden", r#"{"message":"no such slot"}"#),
                },
                ("DELETE", p) if p.starts_with("/reservation/") => match slot_id(p) {
                    Some(id) => {
                        held.retain(|&h| h != id);
                        canned(200, "OK", r#"{"message":"released"}"#)
                    }
                    None => canned(403, "Forbidden", r#"{"message":"no such slot"}"#),
                },
                _ => canned(400, "Bad Request", r#"{"message":"unsupported"}"#),
            };
            write_response(&mut stream, &response);
        }
        held
    });

    (base_url, handle)
}

fn slot_id(path: &str) -> Option<i64> {
    path.rsplit('/').next()?.parse().ok()
}

fn parse_request_line(head: &str) -> (String, String) {
    let mut parts = head.lines().next().unwrap_or_default().split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    (method, path)
}

fn read_head(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(n) => n,
            Err(_) => break,
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_response(stream: &mut TcpStream, response: &CannedResponse) {
    let payload = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        response.status,
        response.reason,
        response.body.len(),
        response.body
    );
    stream.write_all(payload.as_bytes()).expect("write response");
    let _ = stream.flush();
}
