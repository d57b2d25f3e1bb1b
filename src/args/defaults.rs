pub(crate) const DEFAULT_TIMEOUT: &str = "10s";
pub(crate) const DEFAULT_PACING: &str = "10ms";
pub(crate) const DEFAULT_NOTIFY_EVERY: usize = crate::engine::DEFAULT_NOTIFY_EVERY;
