use std::time::Duration;

/// Connection parameters for one logger.
///
/// The logger always talks 115200 baud, 8N1. Only the device path and the
/// read timeout normally need changing. [`LinkSettings::from_env`] picks up
/// `TFD500_DEVICE` and `TFD500_TIMEOUT_MS` on top of the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSettings {
    pub device: String,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl LinkSettings {
    pub const DEFAULT_DEVICE: &'static str = "/dev/ttyUSB0";
    pub const DEFAULT_BAUD_RATE: u32 = 115_200;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub const DEVICE_VAR: &'static str = "TFD500_DEVICE";
    pub const TIMEOUT_VAR: &'static str = "TFD500_TIMEOUT_MS";

    pub fn new(device: &str) -> Self {
        Self::default().with_device(device)
    }

    /// Defaults, overridden by the environment where set.
    pub fn from_env() -> Self {
        Self::default().apply_overrides(
            std::env::var(Self::DEVICE_VAR).ok().as_deref(),
            std::env::var(Self::TIMEOUT_VAR).ok().as_deref(),
        )
    }

    fn apply_overrides(mut self, device: Option<&str>, timeout_ms: Option<&str>) -> Self {
        if let Some(device) = device.filter(|d| !d.trim().is_empty()) {
            self.device = device.trim().to_string();
        }
        if let Some(raw) = timeout_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.timeout = Duration::from_millis(ms),
                Err(_) => log::warn!(
                    "Ignoring {}='{}', not a number of milliseconds",
                    Self::TIMEOUT_VAR,
                    raw
                ),
            }
        }
        self
    }

    pub fn with_device(mut self, device: &str) -> Self {
        self.device = device.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            device: Self::DEFAULT_DEVICE.to_string(),
            baud_rate: Self::DEFAULT_BAUD_RATE,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LinkSettings::default();
        assert_eq!(settings.device, "/dev/ttyUSB0");
        assert_eq!(settings.baud_rate, 115_200);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let settings = LinkSettings::default().apply_overrides(Some("/dev/ttyACM1"), Some("250"));
        assert_eq!(settings.device, "/dev/ttyACM1");
        assert_eq!(settings.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let settings = LinkSettings::new("/dev/ttyS0").apply_overrides(Some("  "), Some("soon"));
        assert_eq!(settings.device, "/dev/ttyS0");
        assert_eq!(settings.timeout, LinkSettings::DEFAULT_TIMEOUT);
    }
}
