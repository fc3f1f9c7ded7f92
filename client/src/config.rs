use std::sync::OnceLock;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";

static API_BASE_URL: OnceLock<String> = OnceLock::new();

fn from_env() -> Option<String> {
    std::env::var("STAFFDESK_API_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

/// Base URL every relative API path is resolved against. Read once from
/// `STAFFDESK_API_URL` and cached for the lifetime of the process.
pub fn api_base_url() -> String {
    API_BASE_URL
        .get_or_init(|| from_env().unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()))
        .clone()
}
