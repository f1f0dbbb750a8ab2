//! Domain models for the client settings bundle.
//!
//! - [`EnvironmentMode`] - Development vs. everything else
//! - [`UrlKind`] - Which base URL is requested (HTTP API or WebSocket)
//! - [`Transport`] - Plain or secure transport tier
//! - [`EmailAuthFlags`] - Profile fields required by email signup
//! - [`Deployment`] - Already-injected deployment values

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Environment Mode
// =============================================================================

/// Runtime environment of the hosting client.
///
/// Only the exact signal value `"development"` selects [`Development`];
/// every other value, and an absent signal, falls through to
/// [`Production`].
///
/// [`Development`]: EnvironmentMode::Development
/// [`Production`]: EnvironmentMode::Production
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    /// Local development: plain transports on localhost.
    Development,
    /// Any deployed environment: secure transports on the remote host.
    #[default]
    Production,
}

impl EnvironmentMode {
    /// Signal value that selects development mode.
    pub const DEVELOPMENT_SIGNAL: &'static str = "development";

    /// Interpret a raw mode signal.
    pub fn from_signal(signal: Option<&str>) -> Self {
        match signal {
            Some(Self::DEVELOPMENT_SIGNAL) => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Transport tier used by both base URLs in this mode.
    pub fn transport(&self) -> Transport {
        match self {
            Self::Development => Transport::Plain,
            Self::Production => Transport::Secure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// URL Kind / Transport
// =============================================================================

/// Which backend base URL a consumer needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    /// HTTP API base URL.
    Api,
    /// WebSocket base URL.
    Ws,
}

/// Security tier of a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    /// `http` / `ws`
    Plain,
    /// `https` / `wss`
    Secure,
}

impl Transport {
    /// URL scheme for the given kind on this tier.
    pub fn scheme_for(&self, kind: UrlKind) -> &'static str {
        match (self, kind) {
            (Self::Plain, UrlKind::Api) => "http",
            (Self::Plain, UrlKind::Ws) => "ws",
            (Self::Secure, UrlKind::Api) => "https",
            (Self::Secure, UrlKind::Ws) => "wss",
        }
    }
}

// =============================================================================
// Feature Flags
// =============================================================================

/// Which profile fields the email signup form requires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailAuthFlags {
    pub first_name: bool,
    pub last_name: bool,
}

impl Default for EmailAuthFlags {
    fn default() -> Self {
        Self {
            first_name: true,
            last_name: true,
        }
    }
}

// =============================================================================
// Deployment
// =============================================================================

/// Deployment-specific values, injected before the bundle is built.
///
/// `host` is a bare authority (`example.com` or `example.com:8443`), never a
/// URL. `port` is the local development port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub app_name: String,
    pub host: String,
    pub port: u16,
    pub dadata_token: String,
    #[serde(default, rename = "isEmailAuth")]
    pub email_auth: EmailAuthFlags,
}

impl Deployment {
    /// Create a deployment with default email-auth flags.
    pub fn new(
        app_name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        dadata_token: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            host: host.into(),
            port,
            dadata_token: dadata_token.into(),
            email_auth: EmailAuthFlags::default(),
        }
    }

    pub fn with_email_auth(mut self, email_auth: EmailAuthFlags) -> Self {
        self.email_auth = email_auth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_signal() {
        assert_eq!(
            EnvironmentMode::from_signal(Some("development")),
            EnvironmentMode::Development
        );
        assert_eq!(
            EnvironmentMode::from_signal(Some("production")),
            EnvironmentMode::Production
        );
        assert_eq!(EnvironmentMode::from_signal(None), EnvironmentMode::Production);
    }

    #[test]
    fn test_unrecognized_signal_is_production() {
        for signal in ["Development", "dev", " development", "test", "staging", ""] {
            assert_eq!(
                EnvironmentMode::from_signal(Some(signal)),
                EnvironmentMode::Production,
                "signal {:?}",
                signal
            );
        }
    }

    #[test]
    fn test_schemes_mirror_tier() {
        assert_eq!(Transport::Plain.scheme_for(UrlKind::Api), "http");
        assert_eq!(Transport::Plain.scheme_for(UrlKind::Ws), "ws");
        assert_eq!(Transport::Secure.scheme_for(UrlKind::Api), "https");
        assert_eq!(Transport::Secure.scheme_for(UrlKind::Ws), "wss");
    }

    #[test]
    fn test_deployment_json_shape() {
        let deployment = Deployment::new("Shop", "example.com", 4000, "token");
        let json = serde_json::to_value(&deployment).unwrap();
        assert_eq!(json["appName"], "Shop");
        assert_eq!(json["dadataToken"], "token");
        assert_eq!(json["isEmailAuth"]["firstName"], true);
        assert_eq!(json["isEmailAuth"]["lastName"], true);
    }

    #[test]
    fn test_email_auth_defaults_when_absent() {
        let json = r#"{"appName":"Shop","host":"example.com","port":4000,"dadataToken":"t"}"#;
        let deployment: Deployment = serde_json::from_str(json).unwrap();
        assert_eq!(deployment.email_auth, EmailAuthFlags::default());
    }
}
