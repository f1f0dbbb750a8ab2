//! The settings bundle handed to the web client.
//!
//! A [`SettingsBundle`] is built once from a [`Deployment`] and a mode
//! signal and never changes afterwards. The two base URLs are accessors,
//! not fields: they consult the signal on every call.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::{Deployment, EmailAuthFlags, EnvironmentMode, UrlKind};
use crate::resolver::{resolve_endpoint, EndpointResolver, FixedMode, ModeSignal};

/// Immutable settings for one client process.
#[derive(Debug, Clone)]
pub struct SettingsBundle {
    app_name: String,
    dadata_token: String,
    email_auth: EmailAuthFlags,
    endpoints: EndpointResolver,
}

impl SettingsBundle {
    /// Build a bundle that reads the mode from `signal`.
    pub fn new(deployment: Deployment, signal: Arc<dyn ModeSignal>) -> Self {
        let Deployment {
            app_name,
            host,
            port,
            dadata_token,
            email_auth,
        } = deployment;

        log::debug!("settings bundle built for '{}' (host {}, dev port {})", app_name, host, port);

        Self {
            app_name,
            dadata_token,
            email_auth,
            endpoints: EndpointResolver::with_signal(host, port, signal),
        }
    }

    /// Build a bundle pinned to one mode.
    pub fn with_mode(deployment: Deployment, mode: EnvironmentMode) -> Self {
        Self::new(deployment, Arc::new(FixedMode(mode)))
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn api_url(&self) -> String {
        self.endpoints.api_url()
    }

    pub fn ws_url(&self) -> String {
        self.endpoints.ws_url()
    }

    pub fn resolve(&self, kind: UrlKind) -> String {
        self.endpoints.resolve(kind)
    }

    pub fn is_email_auth(&self) -> EmailAuthFlags {
        self.email_auth
    }

    pub fn dadata_token(&self) -> &str {
        &self.dadata_token
    }

    pub fn mode(&self) -> EnvironmentMode {
        self.endpoints.mode()
    }

    /// Evaluate every field now into a plain record.
    ///
    /// The mode is read once, so both URLs share a tier.
    pub fn snapshot(&self) -> ResolvedSettings {
        let mode = self.mode();
        let (host, port) = (self.endpoints.host(), self.endpoints.port());
        ResolvedSettings {
            app_name: self.app_name.clone(),
            api_url: resolve_endpoint(UrlKind::Api, mode, host, port),
            ws_url: resolve_endpoint(UrlKind::Ws, mode, host, port),
            is_email_auth: self.email_auth,
            dadata_token: self.dadata_token.clone(),
            mode,
        }
    }
}

/// Settings with both URLs already resolved, in the client's JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub app_name: String,
    pub api_url: String,
    pub ws_url: String,
    pub is_email_auth: EmailAuthFlags,
    pub dadata_token: String,
    pub mode: EnvironmentMode,
}
