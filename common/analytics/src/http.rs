// Copyright 2025 - Beacon Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Proxy-aware HTTP client construction.

use crate::error::AnalyticsError;

/// Capability yielding the address of the local upstream proxy, if one is
/// running. Consulted lazily at client construction time since the proxy may
/// only become known some time after startup.
pub trait ProxyAddrSource: Send + Sync {
    fn proxy_addr(&self) -> Option<String>;
}

/// Source for direct connections, never yields a proxy.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProxy;

impl ProxyAddrSource for NoProxy {
    fn proxy_addr(&self) -> Option<String> {
        None
    }
}

/// Builds an HTTP client routed through the proxy if `proxy` currently yields
/// an address, trusting `ca_cert` (PEM) in addition to the system roots if one
/// is provided.
pub fn http_client(
    ca_cert: Option<&[u8]>,
    proxy: &dyn ProxyAddrSource,
) -> Result<reqwest::Client, AnalyticsError> {
    let mut builder = reqwest::Client::builder();

    if let Some(pem) = ca_cert {
        let cert = reqwest::Certificate::from_pem(pem)
            .map_err(|source| AnalyticsError::MalformedCaCertificate { source })?;
        builder = builder.add_root_certificate(cert);
    }

    if let Some(addr) = proxy.proxy_addr() {
        let proxy = reqwest::Proxy::all(&addr)
            .map_err(|source| AnalyticsError::MalformedProxyAddress { raw: addr, source })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|source| AnalyticsError::ClientBuildFailure { source })
}

#[cfg(test)]
mod test {
    use super::*;

    struct FixedProxy(&'static str);

    impl ProxyAddrSource for FixedProxy {
        fn proxy_addr(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn direct_client_builds_without_proxy() {
        assert!(http_client(None, &NoProxy).is_ok());
    }

    #[test]
    fn proxied_client_builds_with_valid_address() {
        assert!(http_client(None, &FixedProxy("http://127.0.0.1:8118")).is_ok());
    }

    #[test]
    fn malformed_ca_cert_is_rejected() {
        // a pem block whose payload is not base64 fails parsing on every
        // backend, unlike a buffer with no pem blocks at all
        let pem = b"-----BEGIN CERTIFICATE-----\n!!not base64!!\n-----END CERTIFICATE-----\n";
        let err = http_client(Some(pem), &NoProxy).unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedCaCertificate { .. }));
    }
}
