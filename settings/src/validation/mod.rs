//! Build validation for injected deployment values.
//!
//! Deployment values reach the bundle already resolved. This module is
//! the check that runs before a bundle is built: it catches template
//! placeholders that were never substituted (`[[appName]]`, `[[url]]`,
//! ...) and values no client could use.
//!
//! The resolver never validates; a bundle built from an unchecked
//! deployment still resolves URLs.
//!
//! # Example
//!
//! ```rust,ignore
//! use client_settings::{find_placeholders, validate_deployment, Deployment};
//!
//! assert_eq!(find_placeholders("https://[[url]]"), vec!["url"]);
//!
//! let deployment = Deployment::new("[[appName]]", "example.com", 4000, "token");
//! assert!(validate_deployment(&deployment).is_err());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::Deployment;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[\s*([^\[\]\s][^\[\]]*?)\s*\]\]").expect("placeholder pattern is valid")
});

/// Inner text of every `[[...]]` placeholder in `text`, in order, trimmed.
///
/// Any non-empty action between the delimiters counts: bare names
/// (`[[webPort]]`) as well as dotted paths (`[[ .Config.Vue.DadataToken ]]`).
pub fn find_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

pub fn has_placeholder(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// Check a deployment before it is turned into a bundle.
///
/// # Returns
/// * `Ok(())` if every value is usable
/// * `Err(Vec<String>)` with one message per problem
pub fn validate_deployment(deployment: &Deployment) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("appName", deployment.app_name.as_str()),
        ("host", deployment.host.as_str()),
        ("dadataToken", deployment.dadata_token.as_str()),
    ] {
        let tokens = find_placeholders(value);
        if !tokens.is_empty() {
            errors.push(format!(
                "{} contains unresolved placeholder(s): {}",
                field,
                tokens.iter().map(|t| format!("[[{}]]", t)).collect::<Vec<_>>().join(", ")
            ));
        }
        if value.trim().is_empty() {
            errors.push(format!("{} is empty", field));
        }
    }

    let host = deployment.host.trim();
    if host.contains("://") {
        errors.push(format!("host must not include a scheme: '{}'", deployment.host));
    } else if host.contains('/') {
        errors.push(format!("host must not include a path: '{}'", deployment.host));
    }
    if deployment.host.chars().any(char::is_whitespace) {
        errors.push(format!("host must not contain whitespace: '{}'", deployment.host));
    }

    if deployment.port == 0 {
        errors.push("port must be between 1 and 65535".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn is_valid_deployment(deployment: &Deployment) -> bool {
    validate_deployment(deployment).is_ok()
}

/// [`validate_deployment`] as a typed error.
pub fn check_deployment(deployment: &Deployment) -> Result<(), ValidationError> {
    validate_deployment(deployment).map_err(|errors| ValidationError::Rejected { errors })
}
