use anyhow::{Context as AnyhowContext, Result};
use std::net::SocketAddr;

/// Where `serve-http` will listen, after the exposure check
#[derive(Debug, Clone)]
pub(crate) struct ListenPlan {
    pub(crate) addrs: Vec<SocketAddr>,
    pub(crate) listen: SocketAddr,
}

impl ListenPlan {
    /// Resolve `bind` and refuse to expose the directory beyond this host
    /// unless `public` is set.
    pub(crate) async fn resolve(bind: &str, public: bool) -> Result<Self> {
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(bind)
            .await
            .with_context(|| format!("Cannot resolve directory bind address {bind:?}"))?
            .collect();
        Self::check(bind, addrs, public)
    }

    fn check(bind: &str, addrs: Vec<SocketAddr>, public: bool) -> Result<Self> {
        let listen = pick_listen_addr(&addrs)
            .with_context(|| format!("Directory bind address {bind:?} resolved to nothing"))?;

        if !public {
            if let Some(exposed) = addrs.iter().find(|addr| !addr.ip().is_loopback()) {
                anyhow::bail!(
                    "Refusing to serve the directory on {exposed} (from {bind:?}) without --public: \
                     anyone on the network could read and add companies."
                );
            }
        }
        Ok(Self { addrs, listen })
    }
}

/// IPv4 first: `localhost` often resolves to `::1` ahead of `127.0.0.1`.
fn pick_listen_addr(addrs: &[SocketAddr]) -> Option<SocketAddr> {
    addrs
        .iter()
        .copied()
        .find(SocketAddr::is_ipv4)
        .or_else(|| addrs.first().copied())
}
