//! DNS connectivity probe.
//!
//! Resolves a well-known public hostname through the system resolver and
//! reports the first address. Resolution succeeding is a good-enough signal
//! that outbound internet connectivity (NAT gateway, VPC endpoints, resolver
//! config) is intact, so this probe is non-critical: failure only swaps the
//! page row for its offline text.

use std::io;

use async_trait::async_trait;
use tokio::net::lookup_host;

use crate::error::ProbeError;

use super::Probe;

/// Port appended to satisfy the resolver API; only the IP is reported.
const LOOKUP_PORT: u16 = 443;

pub struct DnsProbe {
    hostname: String,
}

impl DnsProbe {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }
}

#[async_trait]
impl Probe for DnsProbe {
    async fn execute(&self) -> Result<String, ProbeError> {
        let mut addrs = lookup_host((self.hostname.as_str(), LOOKUP_PORT))
            .await
            .map_err(ProbeError::DnsResolution)?;

        let addr = addrs.next().ok_or_else(|| {
            ProbeError::DnsResolution(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses resolved for {}", self.hostname),
            ))
        })?;

        Ok(addr.ip().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_localhost() {
        // localhost resolves without network access on any sane host
        let probe = DnsProbe::new("localhost");
        let detail = probe.execute().await.unwrap();
        assert!(detail == "127.0.0.1" || detail == "::1", "unexpected address: {detail}");
    }

    #[tokio::test]
    async fn reports_resolution_failure() {
        let probe = DnsProbe::new("host.invalid");
        let err = probe.execute().await.unwrap_err();
        assert!(matches!(err, ProbeError::DnsResolution(_)));
    }
}
