use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::net::{Ipv4Addr, TcpListener};

use crate::runtime::error::RuntimeError;

pub(crate) const DEFAULT_PORT_BASE: u16 = 20000;
pub(crate) const DEFAULT_PORT_SPAN: u16 = 10000;

/// Ports published by the container engine. A plain test bind cannot see these when the
/// engine forwards them from a VM or a userland proxy.
#[async_trait]
pub(crate) trait PublishedPorts: Send + Sync {
    async fn is_port_published(&self, port: u16) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PortAllocator {
    base: u16,
    span: u16,
}

impl Default for PortAllocator {
    fn default() -> Self {
        PortAllocator::new(DEFAULT_PORT_BASE, DEFAULT_PORT_SPAN)
    }
}

impl PortAllocator {
    pub(crate) fn new(base: u16, span: u16) -> Self {
        PortAllocator { base, span: span.max(1) }
    }

    /// Deterministic port in `[base, base + span)` derived from the SHA-256 of the name.
    pub(crate) fn preferred_port(&self, database_name: &str) -> u16 {
        let span = u32::from(self.span);
        let digest = Sha256::digest(database_name.as_bytes());

        // big-endian 256-bit value reduced modulo span, one byte at a time
        let offset = digest
            .iter()
            .fold(0u32, |acc, byte| (acc * 256 + u32::from(*byte)) % span);

        u16::try_from(u32::from(self.base) + offset).unwrap_or(u16::MAX)
    }

    /// First port at or above `start` that is free on the host and not published by the
    /// engine. The two checks are not atomic with the later `docker run`.
    pub(crate) async fn find_available(&self, start: u16, published: &dyn PublishedPorts) -> Result<u16, RuntimeError> {
        let mut port = start.max(1);

        loop {
            if is_bindable(port) {
                if !published.is_port_published(port).await {
                    debug!("port {} is available", port);
                    return Ok(port);
                }
                debug!("port {} is published by a container, skipping", port);
            } else {
                debug!("port {} is bound on the host, skipping", port);
            }

            port = port.checked_add(1).ok_or(RuntimeError::PortsExhausted(start))?;
        }
    }
}

fn is_bindable(port: u16) -> bool {
    // the test listener is dropped, releasing the port, before returning
    TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).is_ok()
}
