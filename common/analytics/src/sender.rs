// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Fire-and-forget transport for session events.

use std::fmt::Write as _;
use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::error::AnalyticsError;
use crate::event::{session_fields, SessionControl};
use crate::http::{http_client, ProxyAddrSource};
use crate::report::ErrorSink;

/// Sends pre-built session events to the collection endpoint.
///
/// All methods are fire-and-forget: nothing is returned to the caller and
/// every failure ends up in the injected [`ErrorSink`]. The proxy source is
/// consulted anew for every send, so a proxy that only comes up later in the
/// process lifetime is still picked up.
pub struct SessionSender {
    endpoint: Url,
    ca_cert: Option<Vec<u8>>,
    proxy: Arc<dyn ProxyAddrSource>,
    sink: Arc<dyn ErrorSink>,
}

impl SessionSender {
    pub fn new(endpoint: Url, proxy: Arc<dyn ProxyAddrSource>, sink: Arc<dyn ErrorSink>) -> Self {
        SessionSender {
            endpoint,
            ca_cert: None,
            proxy,
            sink,
        }
    }

    /// Trusts the given PEM root certificate in addition to the system roots,
    /// needed when the upstream proxy re-terminates TLS.
    #[must_use]
    pub fn with_ca_cert(mut self, ca_cert: Vec<u8>) -> Self {
        self.ca_cert = Some(ca_cert);
        self
    }

    /// Sends a session start event for `ip`.
    pub async fn start_session(&self, ip: &str, version: &str, client_id: &str) {
        self.track(session_fields(ip, version, client_id, SessionControl::Start))
            .await
    }

    /// Sends a session end event for `ip`.
    pub async fn end_session(&self, ip: &str, version: &str, client_id: &str) {
        self.track(session_fields(ip, version, client_id, SessionControl::End))
            .await
    }

    /// Posts one form-encoded event body to the collection endpoint.
    ///
    /// No retries and no timeout beyond the client default; a session hit
    /// that gets lost stays lost.
    pub async fn track(&self, body: String) {
        let mut request = reqwest::Request::new(Method::POST, self.endpoint.clone());
        request.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        request
            .headers_mut()
            .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len() as u64));
        *request.body_mut() = Some(body.into());

        debug!("full analytics request: {}", dump_request(&request));

        let client = match http_client(self.ca_cert.as_deref(), self.proxy.as_ref()) {
            Ok(client) => client,
            Err(err) => {
                self.sink.report(&err);
                return;
            }
        };

        match client.execute(request).await {
            Ok(response) => {
                debug!("successfully sent analytics request: {}", response.status())
            }
            Err(source) => self.sink.report(&AnalyticsError::RequestSendFailure {
                url: self.endpoint.to_string(),
                source,
            }),
        }
    }
}

/// Renders the outgoing request (request line, headers and body) for debug
/// logging.
fn dump_request(request: &reqwest::Request) -> String {
    let mut out = format!("{} {} HTTP/1.1\r\n", request.method(), request.url());
    for (name, value) in request.headers() {
        let _ = write!(out, "{name}: {}\r\n", value.to_str().unwrap_or("<opaque>"));
    }
    out.push_str("\r\n");
    if let Some(body) = request.body().and_then(|body| body.as_bytes()) {
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}
