//! Build-time Configuration
//!
//! Constants shared by the client and the views.

/// Default API server when `STUDENT_PORTAL_API_URL` is not set at build time
const DEFAULT_API_URL: &str = "https://take-ai-campus-3.onrender.com";

/// Base URL of the remote student API, without a trailing slash
pub fn api_base_url() -> &'static str {
    option_env!("STUDENT_PORTAL_API_URL")
        .map(|url| url.trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

/// Rows requested per roster page
pub const PAGE_SIZE: u32 = 10;

/// localStorage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// How long the boot splash stays up before the session check
pub const SPLASH_DELAY_MS: u32 = 2500;

/// Splash progress tick interval and increment
pub const SPLASH_TICK_MS: u32 = 30;
pub const SPLASH_STEP_PERCENT: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
        assert!(api_base_url().starts_with("http"));
    }
}
