pub const DEFAULT_MAX_ITERATIONS: usize = 20;
pub const DEFAULT_PARSE_RETRIES: usize = 1;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MAX_TOP_K: usize = 50;

pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_ORACLE_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 8_000;

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4_096;

pub const DEFAULT_LOG_LEVEL: &str = "info";
