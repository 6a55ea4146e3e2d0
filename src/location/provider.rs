use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::LocationService;

/// Source of position fixes on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Satellite positioning (high accuracy)
    Gps,
    /// Cell and Wi-Fi based positioning
    Network,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gps => write!(f, "gps"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// Prefer GPS when the host reports it enabled, otherwise fall back to network
pub fn select_provider<L: LocationService + ?Sized>(service: &L) -> Provider {
    if service.is_provider_enabled(Provider::Gps) {
        Provider::Gps
    } else {
        Provider::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingHost;

    #[test]
    fn test_prefers_gps() {
        let host = RecordingHost::new();
        assert_eq!(select_provider(&host), Provider::Gps);
    }

    #[test]
    fn test_falls_back_to_network() {
        let host = RecordingHost::new().with_provider(Provider::Gps, false);
        assert_eq!(select_provider(&host), Provider::Network);
    }

    #[test]
    fn test_network_chosen_even_if_disabled() {
        let host = RecordingHost::new()
            .with_provider(Provider::Gps, false)
            .with_provider(Provider::Network, false);
        assert_eq!(select_provider(&host), Provider::Network);
    }
}
