use std::time::Duration;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);
pub const RETRY_COUNT: u32 = 4;
pub const RETRY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How long a single socket operation may block before the port
    /// is classified as failed.
    pub probe_timeout: Duration,
    /// Number of retry rounds run over the failed ports.
    pub retry_count: u32,
    /// Fixed pause before every retry round.
    pub retry_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: PROBE_TIMEOUT,
            retry_count: RETRY_COUNT,
            retry_delay: RETRY_DELAY,
        }
    }
}
