//! Interface filtering, best-IP selection, and inventory assembly.

use std::net::{IpAddr, Ipv6Addr};

use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;
use serde::Serialize;

use crate::adapters::{self, Adapter};

/// One row of the reported inventory: an eligible adapter and its best IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub ip: String,
    pub mac: String,
}

/// An adapter is reportable when it has a real hardware address, is
/// administratively up, and is not the loopback device. An all-zero MAC
/// counts as no hardware address (virtual adapters report these).
pub fn is_eligible(adapter: &Adapter) -> bool {
    let has_mac = adapter.mac.is_some_and(|mac| mac != MacAddr::zero());
    has_mac && adapter.is_up && !adapter.is_loopback
}

/// Picks the one address that best identifies the machine on a LAN/WAN.
///
/// Single pass over the bound addresses: the first IPv4 wins outright
/// (IPv4-mapped IPv6 is unwrapped to dotted-decimal); otherwise the first
/// global IPv6 becomes the fallback. Loopback and link-local (`fe80::/10`)
/// addresses never qualify.
pub fn select_best_ip(addrs: &[IpNetwork]) -> Option<String> {
    let mut fallback: Option<String> = None;
    for net in addrs {
        match canonical(net.ip()) {
            IpAddr::V4(v4) => {
                if !v4.is_loopback() {
                    return Some(v4.to_string());
                }
            }
            IpAddr::V6(v6) => {
                if v6.is_loopback() || is_link_local(v6) {
                    continue;
                }
                if fallback.is_none() {
                    fallback = Some(v6.to_string());
                }
            }
        }
    }
    fallback
}

fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(ip, IpAddr::V4),
        v4 => v4,
    }
}

fn is_link_local(ip: Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xffc0) == 0xfe80
}

/// Filters adapters, resolves each one's best IP, and uppercases the MAC.
/// Adapters with no reportable address are omitted entirely; enumeration
/// order is preserved.
pub fn build_inventory(adapters: Vec<Adapter>) -> Vec<InterfaceInfo> {
    adapters
        .into_iter()
        .filter(is_eligible)
        .filter_map(|adapter| {
            let ip = select_best_ip(&adapter.addrs)?;
            let mac = adapter.mac?;
            Some(InterfaceInfo {
                name: adapter.name,
                ip,
                mac: mac.to_string().to_uppercase(),
            })
        })
        .collect()
}

/// Fresh inventory from a live enumeration. Never fails: problems degrade
/// to an empty list.
pub fn collect() -> Vec<InterfaceInfo> {
    build_inventory(adapters::enumerate())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> IpNetwork {
        s.parse().unwrap()
    }

    fn mac() -> Option<MacAddr> {
        Some(MacAddr(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff))
    }

    fn adapter(name: &str, mac: Option<MacAddr>, addrs: Vec<IpNetwork>) -> Adapter {
        Adapter {
            name: name.to_string(),
            mac,
            is_up: true,
            is_loopback: false,
            addrs,
        }
    }

    #[test]
    fn loopback_adapter_is_never_eligible() {
        let mut lo = adapter("lo", mac(), vec![net("127.0.0.1")]);
        lo.is_loopback = true;
        assert!(!is_eligible(&lo));
    }

    #[test]
    fn down_adapter_is_not_eligible() {
        let mut eth = adapter("eth0", mac(), vec![net("192.168.1.20")]);
        eth.is_up = false;
        assert!(!is_eligible(&eth));
    }

    #[test]
    fn adapter_without_mac_is_not_eligible() {
        assert!(!is_eligible(&adapter("tun0", None, vec![net("10.8.0.2")])));
        assert!(!is_eligible(&adapter(
            "veth0",
            Some(MacAddr::zero()),
            vec![net("10.8.0.2")]
        )));
    }

    #[test]
    fn up_non_loopback_adapter_with_mac_is_eligible() {
        assert!(is_eligible(&adapter("eth0", mac(), vec![])));
    }

    #[test]
    fn ipv4_wins_over_earlier_global_ipv6() {
        let ip = select_best_ip(&[net("2001:db8::1"), net("192.168.1.20/24")]);
        assert_eq!(ip.as_deref(), Some("192.168.1.20"));
    }

    #[test]
    fn global_ipv6_is_the_fallback() {
        let ip = select_best_ip(&[net("fe80::1"), net("2001:db8::1")]);
        assert_eq!(ip.as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn link_local_only_yields_no_ip() {
        assert_eq!(select_best_ip(&[net("fe80::1234:5678")]), None);
        // Top of the fe80::/10 range, not just the fe80:: prefix itself.
        assert_eq!(select_best_ip(&[net("febf::1")]), None);
    }

    #[test]
    fn loopback_addresses_are_skipped() {
        assert_eq!(select_best_ip(&[net("127.0.0.1"), net("::1")]), None);
        let ip = select_best_ip(&[net("127.0.0.1"), net("192.168.1.20")]);
        assert_eq!(ip.as_deref(), Some("192.168.1.20"));
    }

    #[test]
    fn ipv4_mapped_ipv6_is_reported_dotted_decimal() {
        let ip = select_best_ip(&[net("::ffff:10.0.0.7")]);
        assert_eq!(ip.as_deref(), Some("10.0.0.7"));
        // A mapped loopback is still loopback.
        assert_eq!(select_best_ip(&[net("::ffff:127.0.0.1")]), None);
    }

    #[test]
    fn empty_address_list_yields_no_ip() {
        assert_eq!(select_best_ip(&[]), None);
    }

    #[test]
    fn inventory_omits_adapters_without_reportable_ip() {
        let rows = build_inventory(vec![
            adapter("eth0", mac(), vec![net("192.168.1.20/24")]),
            adapter("wlan0", mac(), vec![net("fe80::1")]),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "eth0");
        assert_eq!(rows[0].ip, "192.168.1.20");
    }

    #[test]
    fn inventory_uppercases_mac_and_preserves_order() {
        let rows = build_inventory(vec![
            adapter("eth0", mac(), vec![net("192.168.1.20")]),
            adapter("eth1", mac(), vec![net("10.0.0.5")]),
        ]);
        assert_eq!(rows[0].mac, "AA:BB:CC:DD:EE:FF");
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["eth0", "eth1"]);
    }

    #[test]
    fn inventory_drops_ineligible_adapters() {
        let mut lo = adapter("lo", mac(), vec![net("127.0.0.1")]);
        lo.is_loopback = true;
        let rows = build_inventory(vec![lo, adapter("docker0", None, vec![net("172.17.0.1")])]);
        assert!(rows.is_empty());
    }
}
