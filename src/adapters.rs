//! Boundary to the platform's interface enumeration.

use pnet::datalink;
use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;
use tracing::debug;

/// One network adapter as the platform reports it, reduced to the fields the
/// inventory logic looks at.
#[derive(Debug, Clone)]
pub struct Adapter {
    pub name: String,
    pub mac: Option<MacAddr>,
    pub is_up: bool,
    pub is_loopback: bool,
    pub addrs: Vec<IpNetwork>,
}

impl From<&datalink::NetworkInterface> for Adapter {
    fn from(iface: &datalink::NetworkInterface) -> Self {
        Self {
            name: iface.name.clone(),
            mac: iface.mac,
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
            addrs: iface.ips.clone(),
        }
    }
}

/// Takes a fresh snapshot of all adapters. Enumeration problems degrade to
/// an empty list; callers never see an error.
pub fn enumerate() -> Vec<Adapter> {
    let interfaces = datalink::interfaces();
    if interfaces.is_empty() {
        debug!("platform reported no network interfaces");
    }
    interfaces.iter().map(Adapter::from).collect()
}
