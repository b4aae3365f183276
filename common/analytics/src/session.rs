// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Session lifecycle: IP resolution, the start event and the shutdown hook.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::AnalyticsError;
use crate::event::DEFAULT_COLLECT_ENDPOINT;
use crate::geolookup::IpSource;
use crate::http::ProxyAddrSource;
use crate::report::ErrorSink;
use crate::sender::SessionSender;

/// Upper bound on the wait for IP resolution. In practice this means "wait
/// until resolved or until the process ends".
pub const MAX_WAIT_FOR_IP: Duration = Duration::from_secs(i32::MAX as u64);

fn default_collect_endpoint() -> Url {
    #[allow(clippy::expect_used)]
    Url::parse(DEFAULT_COLLECT_ENDPOINT).expect("default collection endpoint is a valid url")
}

/// Static inputs of one analytics session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Stable per-installation identifier, passed through opaquely.
    pub device_id: String,

    /// Application version reported as a custom dimension.
    pub version: String,

    /// Collection endpoint; only ever overridden for staging and tests.
    #[serde(default = "default_collect_endpoint")]
    pub collect_endpoint: Url,
}

impl SessionConfig {
    pub fn new(device_id: impl Into<String>, version: impl Into<String>) -> Self {
        SessionConfig {
            device_id: device_id.into(),
            version: version.into(),
            collect_endpoint: default_collect_endpoint(),
        }
    }
}

/// Starts the analytics lifecycle.
///
/// Spawns a task that waits for the public IP to become known and, once it
/// is, stores it and fires the session start event. If the lookup yields
/// nothing, a single diagnostic is reported and no event is ever sent.
///
/// The returned [`SessionStopper`] is the shutdown half: invoke
/// [`SessionStopper::stop`] when the application exits. The spawned task is
/// never cancelled; if the process exits before resolution completes the
/// task is simply abandoned.
pub fn start(
    config: SessionConfig,
    ip_source: Arc<dyn IpSource>,
    proxy: Arc<dyn ProxyAddrSource>,
    sink: Arc<dyn ErrorSink>,
) -> SessionStopper {
    let resolved_ip = Arc::new(OnceLock::new());
    let sender = Arc::new(SessionSender::new(
        config.collect_endpoint.clone(),
        proxy,
        sink.clone(),
    ));

    let holder = Arc::clone(&resolved_ip);
    let start_sender = Arc::clone(&sender);
    let start_config = config.clone();
    tokio::spawn(async move {
        let resolved = ip_source.public_ip(MAX_WAIT_FOR_IP).await;
        let Some(ip) = resolved.filter(|ip| !ip.is_empty()) else {
            sink.report(&AnalyticsError::NoIpResolved {
                wait_secs: MAX_WAIT_FOR_IP.as_secs(),
            });
            return;
        };

        // the holder is only ever written here; set cannot have lost a race
        let _ = holder.set(ip.clone());
        debug!("starting analytics session with ip {ip}");
        start_sender
            .start_session(&ip, &start_config.version, &start_config.device_id)
            .await;
    });

    SessionStopper {
        resolved_ip,
        sender,
        config,
    }
}

/// Shutdown half of the lifecycle, handed to the caller by [`start`].
pub struct SessionStopper {
    resolved_ip: Arc<OnceLock<String>>,
    sender: Arc<SessionSender>,
    config: SessionConfig,
}

impl SessionStopper {
    /// Fires the session end event, reusing the IP the start path resolved.
    /// Does nothing if resolution never completed.
    ///
    /// The resolved IP is not cleared afterwards: invoking stop twice sends
    /// the end event twice.
    pub async fn stop(&self) {
        if let Some(ip) = self.resolved_ip.get() {
            debug!("ending analytics session with ip {ip}");
            self.sender
                .end_session(ip, &self.config.version, &self.config.device_id)
                .await;
        }
    }
}
