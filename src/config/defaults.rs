//! Default configuration values for CE-Bridge

/// Default remote host
pub const DEFAULT_HOST: &str = "localhost";

/// Default remote port
pub const DEFAULT_PORT: u16 = 6300;

/// Default timeout for simple one-shot operations, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default timeout for first/next scans, in seconds. A full-memory first
/// scan scales with target memory size, so this budget is generous.
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 300;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_HOST, "localhost");
        assert_eq!(DEFAULT_PORT, 6300);
        assert!(DEFAULT_SCAN_TIMEOUT_SECS > DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
