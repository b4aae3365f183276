// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

//! # Anonymized session analytics.
//!
//! Reports best-effort session start/end events to the Google Analytics
//! measurement protocol collection endpoint, optionally routed through an
//! upstream proxy. The public IP of the client is resolved through an
//! injected geolocation capability and overrides the reported address so the
//! collection endpoint sees accurate geo data while being asked to anonymize
//! the stored IP.
//!
//! Delivery is strictly fire-and-forget: every failure is handed to an
//! [`ErrorSink`] and swallowed, so a broken analytics path can never affect
//! the host application.

#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::dbg_macro)]

pub mod error;
pub mod event;
pub mod geolookup;
pub mod http;
pub mod report;
pub mod sender;
pub mod session;
#[cfg(test)]
pub(crate) mod testutil;

pub use error::AnalyticsError;
pub use event::{session_fields, SessionControl, DEFAULT_COLLECT_ENDPOINT, TRACKING_ID};
pub use geolookup::IpSource;
pub use http::{http_client, NoProxy, ProxyAddrSource};
pub use report::{ErrorSink, TracingErrorSink};
pub use sender::SessionSender;
pub use session::{start, SessionConfig, SessionStopper, MAX_WAIT_FOR_IP};
