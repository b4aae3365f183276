// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Failures of the analytics path. None of these are ever returned to the
/// host application; they are handed to an [`ErrorSink`](crate::ErrorSink)
/// and dropped.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("geolookup: no public ip resolved within {wait_secs}s")]
    NoIpResolved { wait_secs: u64 },

    #[error("provided proxy address ({raw}) is malformed: {source}")]
    MalformedProxyAddress { raw: String, source: reqwest::Error },

    #[error("provided ca certificate is malformed: {source}")]
    MalformedCaCertificate { source: reqwest::Error },

    #[error("failed to build http client: {source}")]
    ClientBuildFailure { source: reqwest::Error },

    #[error("failed to send request to {url}: {source}")]
    RequestSendFailure { url: String, source: reqwest::Error },
}
