//! Runtime configuration.
use std::env;
use std::time::Duration;

/// Settings for hosting battles and driving players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// How long a polling client waits between fetches while it is not its turn.
    pub poll_interval: Duration,
    /// How often the turn timer looks for overdue turns.
    pub timer_sweep_interval: Duration,
    /// Overrides the rules' turn length for every battle created.
    pub turn_duration: Option<Duration>,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Optimistic commits attempted before the server commits under the lock.
    pub commit_retry_limit: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timer_sweep_interval: Duration::from_millis(250),
            turn_duration: None,
            event_buffer_size: 100,
            commit_retry_limit: 3,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_POLL_INTERVAL_MS` - Client poll interval (default: 2000)
    /// - `ARENA_TIMER_SWEEP_MS` - Turn timer sweep interval (default: 250)
    /// - `ARENA_TURN_SECONDS` - Turn length override (default: from rules)
    /// - `ARENA_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `ARENA_COMMIT_RETRIES` - Optimistic commit attempts (default: 3)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).and_then(|value| value.trim().parse::<u64>().ok());
        let mut config = Self::default();

        if let Some(ms) = read("ARENA_POLL_INTERVAL_MS") {
            config.poll_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = read("ARENA_TIMER_SWEEP_MS") {
            config.timer_sweep_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(seconds) = read("ARENA_TURN_SECONDS") {
            config.turn_duration = Some(Duration::from_secs(seconds.max(1)));
        }
        if let Some(capacity) = read("ARENA_EVENT_BUFFER") {
            config.event_buffer_size = usize::try_from(capacity).unwrap_or(usize::MAX).max(1);
        }
        if let Some(retries) = read("ARENA_COMMIT_RETRIES") {
            config.commit_retry_limit = u32::try_from(retries).unwrap_or(u32::MAX);
        }

        config
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_timer_sweep_interval(mut self, interval: Duration) -> Self {
        self.timer_sweep_interval = interval;
        self
    }

    pub fn with_turn_duration(mut self, turn_duration: Duration) -> Self {
        self.turn_duration = Some(turn_duration);
        self
    }
}
