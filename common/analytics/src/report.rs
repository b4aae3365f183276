// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

use tracing::error;

use crate::error::AnalyticsError;

/// Sink receiving every failure of the analytics path.
///
/// Reporting is the only thing that ever happens to an [`AnalyticsError`]:
/// the sender and the lifecycle swallow them all, so a sink implementation is
/// the single place where delivery problems become observable.
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: &AnalyticsError);
}

/// Sink forwarding everything to the `tracing` error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, error: &AnalyticsError) {
        error!("analytics failure: {error}");
    }
}
