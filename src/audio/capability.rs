//! Platform-version gating for API areas that older devices lack.

use crate::config::Config;

/// An API area that is only queried on new enough platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Vendor `fluence=` multi-mic parameters
    Fluence,
    /// `getDevices` enumeration and per-device type codes
    DeviceEnumeration,
}

impl Capability {
    pub fn min_sdk(self, config: &Config) -> i32 {
        match self {
            Capability::Fluence => config.fluence_min_sdk,
            Capability::DeviceEnumeration => config.device_query_min_sdk,
        }
    }

    pub fn is_supported(self, sdk_int: i32, config: &Config) -> bool {
        sdk_int >= self.min_sdk(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_inclusive() {
        let config = Config::default();
        assert!(!Capability::DeviceEnumeration.is_supported(22, &config));
        assert!(Capability::DeviceEnumeration.is_supported(23, &config));
        assert!(Capability::Fluence.is_supported(34, &config));
    }

    #[test]
    fn gates_are_configured_independently() {
        let config = Config {
            fluence_min_sdk: 28,
            ..Config::default()
        };
        assert!(!Capability::Fluence.is_supported(26, &config));
        assert!(Capability::DeviceEnumeration.is_supported(26, &config));
    }
}
