use secrecy::ExposeSecret;

use super::Platform;
use crate::models::connection::ContainerTarget;

/// Name Docker Desktop resolves to the host machine from inside a container.
pub(crate) const DESKTOP_HOST_ALIAS: &str = "host.docker.internal";
/// Default `docker0` bridge gateway, the host as seen from a Linux container.
pub(crate) const BRIDGE_GATEWAY: &str = "172.17.0.1";

pub(crate) const URI_FLAG: &str = "--mu";
pub(crate) const HOST_PORT_FLAG: &str = "-m";

fn is_loopback(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1")
}

/// Host a container has to dial to reach `host` as seen from the launching machine.
pub(crate) fn container_host(platform: Platform, host: &str) -> String {
    if !is_loopback(host) {
        return host.to_string();
    }

    if platform.is_desktop() {
        DESKTOP_HOST_ALIAS.to_string()
    } else {
        BRIDGE_GATEWAY.to_string()
    }
}

/// Flag and value handed to the Omniboard image.
pub(crate) fn connection_argument(platform: Platform, target: &ContainerTarget) -> (&'static str, String) {
    match target {
        // full URIs are used as given, the host must already be reachable from the container
        ContainerTarget::Uri(uri) => (URI_FLAG, uri.expose_secret().to_string()),
        ContainerTarget::HostPort { host, port, database } => (
            HOST_PORT_FLAG,
            format!("{}:{}:{}", container_host(platform, host), port, database),
        ),
    }
}
