use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Polling budget for [`crate::mcr::McrService::wait_for_provisioning`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of status reads before giving up
    pub max_attempts: u32,
    /// Delay between two consecutive reads
    pub interval: Duration,
}

impl Default for PollConfig {
    /// 30 reads, 10 seconds apart: roughly five minutes.
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(10),
        }
    }
}

impl PollConfig {
    /// At least one read is always made, so `max_attempts` is raised to 1
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Upper bound on time spent sleeping between reads
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

/// Receives the status seen on every poll that was not yet ready
pub trait ProvisionObserver: Send + Sync {
    fn on_not_ready(&self, product_uid: &str, attempt: u32, status: &str);
}

/// Default observer: logs each pending status at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProvisionObserver for TracingObserver {
    fn on_not_ready(&self, product_uid: &str, attempt: u32, status: &str) {
        debug!(product_uid, attempt, "MCR status is {:?} - waiting", status);
    }
}

/// Observer that discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ProvisionObserver for SilentObserver {
    fn on_not_ready(&self, _product_uid: &str, _attempt: u32, _status: &str) {}
}

/// Observer that keeps every pending status it was shown
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    seen: Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl ProvisionObserver for RecordingObserver {
    fn on_not_ready(&self, _product_uid: &str, _attempt: u32, status: &str) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(status.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_config() {
        let config = PollConfig::default();
        assert_eq!(config.max_attempts, 30);
        assert_eq!(config.interval, Duration::from_secs(10));
        assert_eq!(config.budget(), Duration::from_secs(290));
    }

    #[test]
    fn test_new_raises_zero_attempts_to_one() {
        let config = PollConfig::new(0, Duration::from_secs(10));
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.budget(), Duration::ZERO);
    }

    #[test]
    fn test_recording_observer() {
        let observer = RecordingObserver::new();
        observer.on_not_ready("mcr-1", 1, "DEPLOYABLE");
        observer.on_not_ready("mcr-1", 2, "CONFIGURING");
        assert_eq!(observer.statuses(), vec!["DEPLOYABLE", "CONFIGURING"]);
    }
}
