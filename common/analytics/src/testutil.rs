// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Helpers shared by the in-crate test modules.

use std::net::SocketAddr;
use std::sync::Mutex;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::error::AnalyticsError;
use crate::report::ErrorSink;

/// Sink remembering the rendered form of every reported error.
#[derive(Default)]
pub(crate) struct RecordingSink(Mutex<Vec<String>>);

impl RecordingSink {
    pub(crate) fn reports(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, error: &AnalyticsError) {
        self.0.lock().unwrap().push(error.to_string());
    }
}

fn headers_complete(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(body_start) = headers_complete(buf) else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..body_start]);
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    buf.len() - body_start >= content_length
}

/// Accepts up to `max_requests` sequential connections, captures each raw
/// request and answers every one with an empty 200.
pub(crate) async fn capture_server(max_requests: usize) -> (SocketAddr, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (request_tx, request_rx) = mpsc::channel(max_requests);

    tokio::spawn(async move {
        for _ in 0..max_requests {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n")
                .await
                .unwrap();
            if request_tx
                .send(String::from_utf8_lossy(&buf).to_string())
                .await
                .is_err()
            {
                break;
            }
        }
    });

    (addr, request_rx)
}
