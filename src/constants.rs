pub mod api {
    pub const BASE_PATH: &str = "/api/controller/v2";
    pub const PAGE_SIZE: u32 = 200;
}

pub mod network {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const USER_AGENT: &str = concat!("aap-mcp/", env!("CARGO_PKG_VERSION"));
    /// Leads the transport message of a request that ran out of time.
    pub const TIMED_OUT_PREFIX: &str = "request timed out: ";
}

pub mod retry {
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    pub const BACKOFF_BASE_SECS: u64 = 2;
}

pub mod env {
    pub const URL: &str = "AAP_URL";
    pub const TOKEN: &str = "AAP_TOKEN";
    pub const PROJECT_ID: &str = "AAP_PROJECT_ID";
    pub const VERIFY_SSL: &str = "AAP_VERIFY_SSL";
    pub const TIMEOUT: &str = "AAP_TIMEOUT";
    pub const MAX_RETRIES: &str = "AAP_MAX_RETRIES";
    pub const LOG_LEVEL: &str = "AAP_MCP_LOG_LEVEL";
    pub const LOG_LEVEL_FALLBACK: &str = "LOG_LEVEL";
}

pub mod limits {
    pub const LOG_BODY_PREVIEW_BYTES: usize = 512;
}
