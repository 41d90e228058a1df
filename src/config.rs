// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, vault};
use anyhow::{Context, Result};
use std::env;

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Suffix appended to `<service>.<namespace>.svc` in derived endpoints, e.g. `.cluster.local`
    pub domain_suffix: String,
    pub operator_namespace: Option<String>,
    pub vault: VaultConfig,
}

/// Connection settings for the Vault secret store
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub addr: Option<String>,
    /// Static token; when unset the Kubernetes auth method is used to log in
    pub token: Option<String>,
    pub namespace: Option<String>,
    pub role: String,
    pub auth_path: String,
    pub service_account_token_path: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            addr: None,
            token: None,
            namespace: None,
            role: vault::DEFAULT_ROLE.to_string(),
            auth_path: vault::DEFAULT_AUTH_PATH.to_string(),
            service_account_token_path: vault::SERVICE_ACCOUNT_TOKEN_PATH.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let domain_suffix = domain_suffix(optional_var(vars::DOMAIN_NAME)?.as_deref());

        let vault = VaultConfig {
            addr: optional_var(vars::VAULT_ADDR)?,
            token: optional_var(vars::VAULT_TOKEN)?,
            namespace: optional_var(vars::VAULT_NAMESPACE)?,
            role: optional_var(vars::VAULT_ROLE)?
                .unwrap_or_else(|| vault::DEFAULT_ROLE.to_string()),
            auth_path: optional_var(vars::VAULT_AUTH_PATH)?
                .unwrap_or_else(|| vault::DEFAULT_AUTH_PATH.to_string()),
            ..Default::default()
        };

        Ok(Config {
            domain_suffix,
            operator_namespace: optional_var(vars::OPERATOR_NAMESPACE)?,
            vault,
        })
    }
}

/// Turn a cluster domain name into the endpoint suffix: `cluster.local` -> `.cluster.local`
pub fn domain_suffix(domain: Option<&str>) -> String {
    match domain.map(|d| d.trim().trim_start_matches('.')) {
        Some(d) if !d.is_empty() => format!(".{}", d),
        _ => String::new(),
    }
}

/// Read an environment variable, treating unset and empty the same way
fn optional_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(v) if v.is_empty() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e)
            .with_context(|| format!("{} environment variable is not valid unicode", name)),
    }
}
