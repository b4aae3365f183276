// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;

/// Capability resolving the public IP of this client, typically backed by a
/// geolocation lookup service.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Waits up to `max_wait` for the public IP to become known.
    ///
    /// `None` means the lookup did not produce a value within the bound; an
    /// empty string is treated the same way by callers.
    async fn public_ip(&self, max_wait: Duration) -> Option<String>;
}
