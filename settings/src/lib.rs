//! # Client Settings - deployment settings bundle for the web client
//!
//! Supplies the backend HTTP and WebSocket base URLs, chosen by runtime
//! environment mode, plus the display name, email-signup feature flags and
//! the address-lookup service token.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  env / JSON │────▶│   Source    │────▶│ Validation  │────▶│   Bundle    │
//! │ (injected)  │     │ (Deployment)│     │ ([[token]]) │     │ api / ws URL│
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────▲──────┘
//!                                                                    │
//!                                                  ModeSignal (read per call)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use client_settings::{load_validated_from_env, ProcessEnvMode, SettingsBundle};
//!
//! let deployment = load_validated_from_env()?;
//! let bundle = SettingsBundle::new(deployment, Arc::new(ProcessEnvMode::default()));
//! println!("{} -> {}", bundle.app_name(), bundle.api_url());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Environment mode, URL kinds, deployment values
//! - [`resolver`] - Mode signals and endpoint resolution
//! - [`bundle`] - The settings bundle and its resolved snapshot
//! - [`validation`] - Placeholder and value checks before a bundle is built
//! - [`source`] - Loading deployment values from env or file
//! - [`api`] - HTTP server delivering the bundle

// Core modules
pub mod error;
pub mod models;

// Resolution
pub mod resolver;
pub mod bundle;

// Injection
pub mod validation;
pub mod source;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ServerError, ServerResult, SettingsError, SettingsResult, SourceError, SourceResult,
    ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Deployment, EmailAuthFlags, EnvironmentMode, Transport, UrlKind};

// =============================================================================
// Re-exports - Resolver
// =============================================================================

pub use resolver::{
    resolve_endpoint, EndpointResolver, FixedMode, ModeSignal, ProcessEnvMode, DEFAULT_MODE_VAR,
};

// =============================================================================
// Re-exports - Bundle
// =============================================================================

pub use bundle::{ResolvedSettings, SettingsBundle};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    check_deployment, find_placeholders, has_placeholder, is_valid_deployment,
    validate_deployment,
};

// =============================================================================
// Re-exports - Source
// =============================================================================

pub use source::{
    load_from_env, load_from_file, load_from_lookup, load_validated_from_env,
    load_validated_from_file, parse_deployment_json,
};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
