//! Build-time API endpoint configuration.
//!
//! The backend base URL is baked in via `FOLIOFORGE_API_BASE_URL` so static
//! WASM deployments can point at a separately hosted API. An empty base means
//! same-origin relative paths, which is the default for local development
//! behind a proxy.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Returns the full URL for an API path, honoring the configured base.
pub fn endpoint(path: &str) -> String {
    join_url(option_env!("FOLIOFORGE_API_BASE_URL").unwrap_or(""), path)
}

/// Joins a base URL and a path without doubling or dropping slashes.
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_owned()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
