//! Minimal HTTP server for tests: answers a fixed sequence of requests,
//! one connection each, and records what it was sent.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// What the server saw.
pub struct Captured {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Accept one connection and reply with `status` and a JSON `body`.
/// Returns the base URL and a handle yielding the capture.
pub fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let (base, handle) = serve(vec![(status, body)]);
    let handle = thread::spawn(move || {
        let mut seen = handle.join().unwrap();
        seen.remove(0)
    });
    (base, handle)
}

/// Answer `responses` in order, one connection per response. Every reply
/// carries `Connection: close`, so the client reconnects for the next one.
pub fn serve(
    responses: Vec<(&'static str, &'static str)>,
) -> (String, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        responses
            .into_iter()
            .map(|(status, body)| {
                let (stream, _) = listener.accept().unwrap();
                answer(stream, status, body)
            })
            .collect()
    });

    (base, handle)
}

fn answer(mut stream: TcpStream, status: &str, body: &str) -> Captured {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let len = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .map(|(_, v)| v.parse::<usize>().unwrap())
        .unwrap_or(0);
    let mut raw = vec![0; len];
    reader.read_exact(&mut raw).unwrap();

    write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .unwrap();
    stream.flush().unwrap();

    Captured {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(raw).unwrap(),
    }
}
