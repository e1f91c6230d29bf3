// Active-network transport detection.
//
// Reachability follows the transport of the active network: Wi-Fi,
// cellular, Ethernet and Bluetooth tethering count as online; loopback,
// tunnels and everything else do not. The classification is pure and
// tested; the probe feeding it is the only per-OS code in the crate.

use serde::Serialize;

/// The physical medium behind a network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Wifi,
    Cellular,
    Ethernet,
    Bluetooth,
    /// Tunnels, bridges, container veths - carries traffic but proves
    /// no uplink of its own.
    Virtual,
    Loopback,
    Other,
}

impl Transport {
    /// Only these four transports mean the machine can actually reach
    /// the site; an active VPN or container bridge on its own does not.
    pub fn is_online(self) -> bool {
        matches!(
            self,
            Transport::Wifi | Transport::Cellular | Transport::Ethernet | Transport::Bluetooth
        )
    }
}

/// Snapshot of the transports behind the currently active network,
/// taken once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkStatus {
    pub transports: Vec<Transport>,
}

impl NetworkStatus {
    pub fn is_reachable(&self) -> bool {
        self.transports.iter().any(|t| t.is_online())
    }
}

/// Probe the active network. Probe failure reads as unreachable, which
/// only makes the surface prefer cached content.
pub fn probe() -> NetworkStatus {
    platform::active_transports()
}

/// Classify an interface by its OS name. Covers the Linux predictable
/// names, the classic ones, and the BSD/macOS families.
pub fn classify_interface(name: &str) -> Transport {
    let n = name.to_ascii_lowercase();

    if n.starts_with("lo") {
        Transport::Loopback
    } else if n.starts_with("awdl")
        || n.starts_with("llw")
        || n.starts_with("p2p")
        || n.starts_with("utun")
        || n.starts_with("tun")
        || n.starts_with("tap")
        || n.starts_with("wg")
        || n.starts_with("ipsec")
        || n.starts_with("zt")
        || n.starts_with("tailscale")
        || n.starts_with("docker")
        || n.starts_with("veth")
        || n.starts_with("br")
        || n.starts_with("virbr")
        || n.starts_with("vnet")
        || n.starts_with("vmnet")
    {
        Transport::Virtual
    } else if n.starts_with("wl") || n.starts_with("ath") || n.starts_with("wifi") {
        Transport::Wifi
    } else if n.starts_with("ww") || n.starts_with("rmnet") || n.starts_with("ppp") {
        Transport::Cellular
    } else if n.starts_with("bnep") || n.starts_with("pan") {
        Transport::Bluetooth
    } else if n.starts_with("en")
        || n.starts_with("eth")
        || n.starts_with("em")
        || n.starts_with("usb")
        || n.starts_with("bond")
        || n.starts_with("team")
    {
        Transport::Ethernet
    } else {
        Transport::Other
    }
}

#[cfg(unix)]
mod platform {
    use std::ffi::CStr;

    use super::{classify_interface, NetworkStatus, Transport};

    /// Enumerate running, non-loopback interfaces and map their names
    /// onto transports.
    pub fn active_transports() -> NetworkStatus {
        let mut transports: Vec<Transport> = Vec::new();

        for name in running_interface_names() {
            let transport = classify_interface(&name);
            if !transports.contains(&transport) {
                transports.push(transport);
            }
        }

        NetworkStatus { transports }
    }

    fn running_interface_names() -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut addrs: *mut libc::ifaddrs = std::ptr::null_mut();

        // getifaddrs hands us a malloc'd list we must walk and free.
        unsafe {
            if libc::getifaddrs(&mut addrs) != 0 {
                return names;
            }

            let mut cursor = addrs;
            while !cursor.is_null() {
                let entry = &*cursor;
                cursor = entry.ifa_next;

                let required = (libc::IFF_UP | libc::IFF_RUNNING) as u32;
                if entry.ifa_flags & required != required {
                    continue;
                }
                if entry.ifa_flags & libc::IFF_LOOPBACK as u32 != 0 {
                    continue;
                }
                if entry.ifa_name.is_null() {
                    continue;
                }

                let name = CStr::from_ptr(entry.ifa_name).to_string_lossy().into_owned();
                if !names.contains(&name) {
                    names.push(name);
                }
            }

            libc::freeifaddrs(addrs);
        }

        names
    }
}

#[cfg(windows)]
mod platform {
    use super::{NetworkStatus, Transport};

    // IANA ifType values reported by the connection profile's adapter.
    const IF_TYPE_ETHERNET: u32 = 6;
    const IF_TYPE_IEEE80211: u32 = 71;
    const IF_TYPE_WWANPP: u32 = 243;
    const IF_TYPE_WWANPP2: u32 = 244;

    /// Ask WinRT for the active internet connection profile; no profile
    /// means no active network.
    pub fn active_transports() -> NetworkStatus {
        use windows::Networking::Connectivity::NetworkInformation;

        let transport = NetworkInformation::GetInternetConnectionProfile()
            .ok()
            .and_then(|profile| profile.NetworkAdapter().ok())
            .and_then(|adapter| adapter.IanaInterfaceType().ok())
            .map(|iana| match iana {
                IF_TYPE_ETHERNET => Transport::Ethernet,
                IF_TYPE_IEEE80211 => Transport::Wifi,
                IF_TYPE_WWANPP | IF_TYPE_WWANPP2 => Transport::Cellular,
                _ => Transport::Other,
            });

        NetworkStatus {
            transports: transport.into_iter().collect(),
        }
    }
}

#[cfg(not(any(unix, windows)))]
mod platform {
    use super::NetworkStatus;

    // No probe on this target; reads as unreachable, and the surface
    // still falls back to the network on a cache miss.
    pub fn active_transports() -> NetworkStatus {
        NetworkStatus {
            transports: Vec::new(),
        }
    }
}
