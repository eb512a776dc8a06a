/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total attempts including the first. Values below 1 behave as 1.
    pub max_attempts: usize,
    /// Base retry backoff in milliseconds (exponential strategy: the wait
    /// before attempt *k* is `retry_backoff_ms * 2^(k-2)`).
    pub retry_backoff_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_attempts: 3,
            retry_backoff_ms: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClientOptions;

    #[test]
    fn defaults_match_delivery_contract() {
        let opts = ClientOptions::default();
        assert_eq!(opts.timeout_ms, 30_000);
        assert_eq!(opts.max_attempts, 3);
        assert_eq!(opts.retry_backoff_ms, 1_000);
    }
}
