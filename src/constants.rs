use std::num::NonZeroUsize;

// Service defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 12345;
pub const DEFAULT_CHECKPOINT_INTERVAL_SECS: u64 = 15;
pub const SERVER_DEFAULT_OFFSET: u64 = 0;
pub const SERVER_DEFAULT_LIMIT: u64 = 10;

// Client defaults
pub const DEFAULT_CLIENT_HOST: &str = "localhost";
pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_PAGE_LIMIT: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(limit) => limit,
    None => panic!("page limit must be non-zero"),
};
pub const MAX_PAGE_LIMIT: usize = 10_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// UI Constants
pub const PLACEHOLDER_TEXT: &str = "…";
pub const APP_TITLE: &str = "loggy";
