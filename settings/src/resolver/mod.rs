//! Environment-conditional endpoint resolution.
//!
//! The environment mode is an explicit dependency: a [`ModeSignal`] is
//! handed to the [`EndpointResolver`] and consulted on every call, so a
//! resolver built before the host settles its mode still answers with the
//! current mode.
//!
//! | Mode          | API                      | WebSocket              |
//! |---------------|--------------------------|------------------------|
//! | `development` | `http://localhost:<port>`| `ws://localhost:<port>`|
//! | anything else | `https://<host>`         | `wss://<host>`         |
//!
//! # Example
//!
//! ```rust,ignore
//! use client_settings::{EndpointResolver, EnvironmentMode, FixedMode};
//!
//! let resolver = EndpointResolver::new("example.com", 4000, FixedMode(EnvironmentMode::Development));
//! assert_eq!(resolver.api_url(), "http://localhost:4000");
//! ```

use std::env;
use std::fmt;
use std::sync::Arc;

use crate::models::{EnvironmentMode, UrlKind};

/// Environment variable read by [`ProcessEnvMode::default`].
pub const DEFAULT_MODE_VAR: &str = "NODE_ENV";

/// Host used for every development URL.
pub const DEVELOPMENT_HOST: &str = "localhost";

// =============================================================================
// Mode Signals
// =============================================================================

/// Source of the current environment mode.
///
/// Implementations must be cheap and must not fail; an unreadable signal
/// reports [`EnvironmentMode::Production`].
pub trait ModeSignal: Send + Sync {
    fn current(&self) -> EnvironmentMode;
}

/// A mode fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMode(pub EnvironmentMode);

impl ModeSignal for FixedMode {
    fn current(&self) -> EnvironmentMode {
        self.0
    }
}

/// Reads the mode from a process environment variable on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEnvMode {
    var: String,
}

impl ProcessEnvMode {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for ProcessEnvMode {
    fn default() -> Self {
        Self::new(DEFAULT_MODE_VAR)
    }
}

impl ModeSignal for ProcessEnvMode {
    fn current(&self) -> EnvironmentMode {
        // Unset and non-UTF-8 values both read as "not development".
        let value = env::var(&self.var).ok();
        EnvironmentMode::from_signal(value.as_deref())
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Build the base URL for `kind` under `mode`.
///
/// Total and side-effect free.
pub fn resolve_endpoint(kind: UrlKind, mode: EnvironmentMode, host: &str, port: u16) -> String {
    let scheme = mode.transport().scheme_for(kind);
    match mode {
        EnvironmentMode::Development => format!("{}://{}:{}", scheme, DEVELOPMENT_HOST, port),
        EnvironmentMode::Production => format!("{}://{}", scheme, host),
    }
}

/// Resolves API and WebSocket base URLs against a live mode signal.
#[derive(Clone)]
pub struct EndpointResolver {
    host: String,
    port: u16,
    signal: Arc<dyn ModeSignal>,
}

impl EndpointResolver {
    pub fn new(host: impl Into<String>, port: u16, signal: impl ModeSignal + 'static) -> Self {
        Self::with_signal(host, port, Arc::new(signal))
    }

    /// Create a resolver sharing an existing signal.
    pub fn with_signal(host: impl Into<String>, port: u16, signal: Arc<dyn ModeSignal>) -> Self {
        Self {
            host: host.into(),
            port,
            signal,
        }
    }

    /// Current mode, as reported by the signal right now.
    pub fn mode(&self) -> EnvironmentMode {
        self.signal.current()
    }

    pub fn resolve(&self, kind: UrlKind) -> String {
        let mode = self.mode();
        let url = resolve_endpoint(kind, mode, &self.host, self.port);
        log::trace!("resolved {:?} endpoint for {} mode: {}", kind, mode, url);
        url
    }

    pub fn api_url(&self) -> String {
        self.resolve(UrlKind::Api)
    }

    pub fn ws_url(&self) -> String {
        self.resolve(UrlKind::Ws)
    }

    /// Both URLs from a single reading of the signal.
    ///
    /// Two separate calls could straddle a mode change; this cannot.
    pub fn resolve_pair(&self) -> (String, String) {
        let mode = self.mode();
        (
            resolve_endpoint(UrlKind::Api, mode, &self.host, self.port),
            resolve_endpoint(UrlKind::Ws, mode, &self.host, self.port),
        )
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Debug for EndpointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointResolver")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mode signal that tests can flip between calls.
    struct Toggle(AtomicBool);

    impl ModeSignal for Toggle {
        fn current(&self) -> EnvironmentMode {
            if self.0.load(Ordering::SeqCst) {
                EnvironmentMode::Development
            } else {
                EnvironmentMode::Production
            }
        }
    }

    #[test]
    fn test_development_scenario() {
        let resolver = EndpointResolver::new(
            "example.com",
            4000,
            FixedMode(EnvironmentMode::Development),
        );
        assert_eq!(resolver.api_url(), "http://localhost:4000");
        assert_eq!(resolver.ws_url(), "ws://localhost:4000");
    }

    #[test]
    fn test_production_scenario() {
        let resolver = EndpointResolver::new(
            "example.com",
            4000,
            FixedMode(EnvironmentMode::Production),
        );
        assert_eq!(resolver.api_url(), "https://example.com");
        assert_eq!(resolver.ws_url(), "wss://example.com");
    }

    #[test]
    fn test_unset_env_falls_back_to_secure() {
        let var = "CLIENT_SETTINGS_TEST_MODE_UNSET";
        std::env::remove_var(var);
        let resolver = EndpointResolver::new("example.com", 4000, ProcessEnvMode::new(var));
        assert_eq!(resolver.api_url(), "https://example.com");
        assert_eq!(resolver.ws_url(), "wss://example.com");
    }

    #[test]
    fn test_env_signal_is_read_per_call() {
        let var = "CLIENT_SETTINGS_TEST_MODE_FLIP";
        let resolver = EndpointResolver::new("example.com", 4000, ProcessEnvMode::new(var));

        std::env::set_var(var, "development");
        assert_eq!(resolver.api_url(), "http://localhost:4000");

        std::env::set_var(var, "production");
        assert_eq!(resolver.api_url(), "https://example.com");

        std::env::set_var(var, "staging");
        assert_eq!(resolver.ws_url(), "wss://example.com");

        std::env::remove_var(var);
    }

    #[test]
    fn test_no_memoization() {
        let signal = Arc::new(Toggle(AtomicBool::new(true)));
        let resolver = EndpointResolver::with_signal("example.com", 4000, signal.clone());
        assert_eq!(resolver.ws_url(), "ws://localhost:4000");

        signal.0.store(false, Ordering::SeqCst);
        assert_eq!(resolver.ws_url(), "wss://example.com");
    }

    #[test]
    fn test_idempotent_under_unchanged_signal() {
        for mode in [EnvironmentMode::Development, EnvironmentMode::Production] {
            let resolver = EndpointResolver::new("example.com", 4000, FixedMode(mode));
            let first = resolver.api_url();
            for _ in 0..10 {
                assert_eq!(resolver.api_url(), first);
            }
            let first_ws = resolver.ws_url();
            assert_eq!(resolver.ws_url(), first_ws);
        }
    }

    #[test]
    fn test_tier_and_host_agreement() {
        for mode in [EnvironmentMode::Development, EnvironmentMode::Production] {
            let resolver = EndpointResolver::new("app.example.org", 8080, FixedMode(mode));
            let (api, ws) = resolver.resolve_pair();
            let secure = |url: &str| url.starts_with("https://") || url.starts_with("wss://");
            assert_eq!(secure(&api), secure(&ws));
            assert_eq!(secure(&api), !mode.is_development());

            let api_authority = api.split_once("://").map(|(_, rest)| rest);
            let ws_authority = ws.split_once("://").map(|(_, rest)| rest);
            assert_eq!(api_authority, ws_authority);
        }
    }

    #[test]
    fn test_resolve_endpoint_keeps_host_port_suffix() {
        let url = resolve_endpoint(UrlKind::Api, EnvironmentMode::Production, "example.com:8443", 4000);
        assert_eq!(url, "https://example.com:8443");
    }

    #[test]
    fn test_default_signal_var() {
        // Same variable web client bundlers set for development builds
        assert_eq!(ProcessEnvMode::default().var(), "NODE_ENV");
    }
}
