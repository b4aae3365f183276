// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Construction of the fixed measurement-protocol field set.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// Property the session hits are recorded against.
pub const TRACKING_ID: &str = "UA-21815217-12";

/// Production collection endpoint of the measurement protocol.
pub const DEFAULT_COLLECT_ENDPOINT: &str = "https://ssl.google-analytics.com/collect";

/// Session control flag of a hit. Exactly one of these is attached to every
/// event so the collection endpoint records session duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionControl {
    Start,
    End,
}

impl SessionControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionControl::Start => "start",
            SessionControl::End => "end",
        }
    }
}

impl fmt::Display for SessionControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the canonical form-encoded body of a single session event.
///
/// Pure and deterministic: identical inputs always yield an identical string,
/// with fields serialized in key order. Inputs are passed through unvalidated;
/// the wire format is fixed by the measurement protocol (v1) and must not be
/// altered.
pub fn session_fields(
    ip: &str,
    version: &str,
    client_id: &str,
    control: SessionControl,
) -> String {
    let fields: BTreeMap<&str, &str> = [
        ("v", "1"),
        ("cid", client_id),
        ("tid", TRACKING_ID),
        // override the reported ip so the endpoint derives accurate geo data
        ("uip", ip),
        // asks the endpoint not to store the ip it received
        ("aip", "1"),
        ("dp", "localhost"),
        ("t", "pageview"),
        // custom dimension carrying the application version
        ("cd1", version),
        ("sc", control.as_str()),
    ]
    .into_iter()
    .collect();

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(fields);
    serializer.finish()
}
