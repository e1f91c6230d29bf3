// Pure launch-plan logic - no Tauri imports allowed.
// Everything the shell decides about the browser surface before the
// surface exists lives here so it can be unit tested.

use url::Url;

use crate::connectivity::NetworkStatus;

/// The one destination this shell ever loads.
pub const SITE_URL: &str = "https://tscireland.com/";

/// Content-loading policy for the surface.
///
/// `CacheElseNetwork` prefers previously stored responses over issuing a
/// new network request. `NetworkFirst` is the engine default and is left
/// untouched whenever the network is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    NetworkFirst,
    CacheElseNetwork,
}

/// Everything the shell configures on the browser surface, fixed before
/// the first (and only) navigation is issued.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePlan {
    pub url: Url,
    pub cache_mode: CacheMode,
    /// The remote site is client-side rendered; scripts stay enabled on
    /// every path.
    pub javascript: bool,
}

impl SurfacePlan {
    /// Build the launch plan for the given connectivity snapshot.
    ///
    /// Offline launches still target the fixed origin - only the cache
    /// mode differs, so the engine can serve what it already stored.
    pub fn for_launch(network: &NetworkStatus) -> Self {
        let cache_mode = if network.is_reachable() {
            CacheMode::NetworkFirst
        } else {
            CacheMode::CacheElseNetwork
        };

        Self {
            url: site_url(),
            cache_mode,
            javascript: true,
        }
    }
}

/// Parse the compiled-in origin. The constant is a valid HTTPS URL, so
/// this cannot fail at runtime; the tests below pin that down.
pub fn site_url() -> Url {
    Url::parse(SITE_URL).expect("SITE_URL is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::{NetworkStatus, Transport};
    use rstest::rstest;

    fn status_of(transports: &[Transport]) -> NetworkStatus {
        NetworkStatus {
            transports: transports.to_vec(),
        }
    }

    #[test]
    fn test_site_url_is_the_fixed_https_origin() {
        let url = site_url();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("tscireland.com"));
        assert_eq!(url.as_str(), SITE_URL);
    }

    #[rstest]
    #[case(&[Transport::Wifi], CacheMode::NetworkFirst)]
    #[case(&[Transport::Cellular], CacheMode::NetworkFirst)]
    #[case(&[Transport::Ethernet], CacheMode::NetworkFirst)]
    #[case(&[Transport::Bluetooth], CacheMode::NetworkFirst)]
    #[case(&[], CacheMode::CacheElseNetwork)]
    #[case(&[Transport::Virtual], CacheMode::CacheElseNetwork)]
    #[case(&[Transport::Loopback, Transport::Other], CacheMode::CacheElseNetwork)]
    fn test_cache_mode_follows_reachability(
        #[case] transports: &[Transport],
        #[case] expected: CacheMode,
    ) {
        let plan = SurfacePlan::for_launch(&status_of(transports));
        assert_eq!(plan.cache_mode, expected);
    }

    #[test]
    fn test_offline_launch_still_targets_the_fixed_origin() {
        let offline = SurfacePlan::for_launch(&status_of(&[]));
        let online = SurfacePlan::for_launch(&status_of(&[Transport::Wifi]));

        assert_eq!(offline.url, online.url);
        assert_eq!(offline.url.as_str(), SITE_URL);
    }

    #[rstest]
    #[case(&[Transport::Wifi])]
    #[case(&[Transport::Ethernet])]
    #[case(&[])]
    fn test_javascript_enabled_on_every_path(#[case] transports: &[Transport]) {
        assert!(SurfacePlan::for_launch(&status_of(transports)).javascript);
    }
}
