//! Loading deployment values from the environment or a config file.
//!
//! This is the injection step: it runs once, before the bundle exists.
//! Exactly one source is read per load; values are never layered.
//!
//! # Environment keys
//!
//! | Key                     | Field                  | Required |
//! |-------------------------|------------------------|----------|
//! | `APP_NAME`              | `appName`              | yes      |
//! | `APP_HOST`              | `host`                 | yes      |
//! | `WEB_PORT`              | `port`                 | yes      |
//! | `DADATA_TOKEN`          | `dadataToken`          | yes      |
//! | `EMAIL_AUTH_FIRST_NAME` | `isEmailAuth.firstName`| no (true)|
//! | `EMAIL_AUTH_LAST_NAME`  | `isEmailAuth.lastName` | no (true)|
//!
//! # Config file
//!
//! ```json
//! {
//!   "appName": "Acme Market",
//!   "host": "example.com",
//!   "port": 4000,
//!   "dadataToken": "1cf3a086e3dbe130",
//!   "isEmailAuth": { "firstName": true, "lastName": true }
//! }
//! ```

use std::env;
use std::fs;
use std::path::Path;

use crate::error::{SettingsResult, SourceError, SourceResult};
use crate::models::{Deployment, EmailAuthFlags};
use crate::validation::check_deployment;

pub const APP_NAME_VAR: &str = "APP_NAME";
pub const APP_HOST_VAR: &str = "APP_HOST";
pub const WEB_PORT_VAR: &str = "WEB_PORT";
pub const DADATA_TOKEN_VAR: &str = "DADATA_TOKEN";
pub const EMAIL_AUTH_FIRST_NAME_VAR: &str = "EMAIL_AUTH_FIRST_NAME";
pub const EMAIL_AUTH_LAST_NAME_VAR: &str = "EMAIL_AUTH_LAST_NAME";

// =============================================================================
// Environment
// =============================================================================

/// Load a deployment from the process environment.
pub fn load_from_env() -> SourceResult<Deployment> {
    load_from_lookup(|key| env::var(key).ok())
}

/// Load a deployment through an arbitrary key lookup.
pub fn load_from_lookup<F>(lookup: F) -> SourceResult<Deployment>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| lookup(key).ok_or_else(|| SourceError::MissingVar(key.to_string()));

    let app_name = required(APP_NAME_VAR)?;
    let host = required(APP_HOST_VAR)?;
    let port = parse_port(&required(WEB_PORT_VAR)?)?;
    let dadata_token = required(DADATA_TOKEN_VAR)?;

    let defaults = EmailAuthFlags::default();
    let email_auth = EmailAuthFlags {
        first_name: optional_flag(&lookup, EMAIL_AUTH_FIRST_NAME_VAR, defaults.first_name)?,
        last_name: optional_flag(&lookup, EMAIL_AUTH_LAST_NAME_VAR, defaults.last_name)?,
    };

    log::debug!("deployment loaded from environment: {} ({})", app_name, host);

    Ok(Deployment {
        app_name,
        host,
        port,
        dadata_token,
        email_auth,
    })
}

fn parse_port(raw: &str) -> SourceResult<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| SourceError::InvalidPort(raw.to_string()))
}

fn optional_flag<F>(lookup: &F, key: &str, default: bool) -> SourceResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => parse_flag(&value).ok_or_else(|| SourceError::InvalidFlag {
            key: key.to_string(),
            value,
        }),
    }
}

/// Parse a boolean flag value (`true/false`, `1/0`, `yes/no`, `on/off`).
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Config File
// =============================================================================

/// Load a deployment from a JSON config file.
pub fn load_from_file(path: impl AsRef<Path>) -> SourceResult<Deployment> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let deployment = parse_deployment_json(&content)?;
    log::debug!("deployment loaded from {}: {}", path.display(), deployment.app_name);
    Ok(deployment)
}

pub fn parse_deployment_json(content: &str) -> SourceResult<Deployment> {
    Ok(serde_json::from_str(content)?)
}

// =============================================================================
// Validated loads
// =============================================================================

/// [`load_from_env`] followed by build validation.
pub fn load_validated_from_env() -> SettingsResult<Deployment> {
    let deployment = load_from_env()?;
    check_deployment(&deployment)?;
    Ok(deployment)
}

/// [`load_from_file`] followed by build validation.
pub fn load_validated_from_file(path: impl AsRef<Path>) -> SettingsResult<Deployment> {
    let deployment = load_from_file(path)?;
    check_deployment(&deployment)?;
    Ok(deployment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base_vars() -> HashMap<String, String> {
        vars(&[
            (APP_NAME_VAR, "Acme Market"),
            (APP_HOST_VAR, "example.com"),
            (WEB_PORT_VAR, "4000"),
            (DADATA_TOKEN_VAR, "1cf3a086e3dbe130"),
        ])
    }

    #[test]
    fn test_load_from_lookup() {
        let map = base_vars();
        let deployment = load_from_lookup(|k| map.get(k).cloned()).unwrap();
        assert_eq!(deployment.app_name, "Acme Market");
        assert_eq!(deployment.host, "example.com");
        assert_eq!(deployment.port, 4000);
        assert_eq!(deployment.email_auth, EmailAuthFlags::default());
    }

    #[test]
    fn test_missing_var() {
        let mut map = base_vars();
        map.remove(APP_HOST_VAR);
        let err = load_from_lookup(|k| map.get(k).cloned()).unwrap_err();
        assert!(matches!(err, SourceError::MissingVar(ref k) if k == APP_HOST_VAR));
    }

    #[test]
    fn test_invalid_port() {
        let mut map = base_vars();
        map.insert(WEB_PORT_VAR.into(), "70000".into());
        let err = load_from_lookup(|k| map.get(k).cloned()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidPort(_)));
    }

    #[test]
    fn test_flags_from_lookup() {
        let mut map = base_vars();
        map.insert(EMAIL_AUTH_FIRST_NAME_VAR.into(), "no".into());
        map.insert(EMAIL_AUTH_LAST_NAME_VAR.into(), "TRUE".into());
        let deployment = load_from_lookup(|k| map.get(k).cloned()).unwrap();
        assert!(!deployment.email_auth.first_name);
        assert!(deployment.email_auth.last_name);

        map.insert(EMAIL_AUTH_LAST_NAME_VAR.into(), "sometimes".into());
        let err = load_from_lookup(|k| map.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains(EMAIL_AUTH_LAST_NAME_VAR));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"appName":"Acme Market","host":"example.com","port":4000,"dadataToken":"abc","isEmailAuth":{{"firstName":false,"lastName":true}}}}"#
        )
        .unwrap();

        let deployment = load_from_file(file.path()).unwrap();
        assert_eq!(deployment.port, 4000);
        assert!(!deployment.email_auth.first_name);
        assert!(deployment.email_auth.last_name);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SourceError::IoError(_)));
    }

    #[test]
    fn test_validated_file_rejects_placeholders() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"appName":"[[appName]]","host":"[[url]]","port":4000,"dadataToken":"abc"}}"#
        )
        .unwrap();

        let err = load_validated_from_file(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)));
        assert!(err.to_string().contains("[[url]]"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" On "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
