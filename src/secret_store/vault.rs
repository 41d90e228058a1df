// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Vault KV v2 secret store

use super::{SecretStoreClient, SecretStoreProvider};
use crate::config::VaultConfig;
use crate::constants::{secret_keys, vault};
use crate::error::{CredentialsError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

/// Connects to Vault using a static token or the Kubernetes auth method
pub struct VaultProvider {
    config: VaultConfig,
    http: reqwest::Client,
}

struct VaultClient {
    http: reqwest::Client,
    addr: String,
    token: String,
    namespace: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth: Option<LoginAuth>,
}

#[derive(Deserialize)]
struct LoginAuth {
    client_token: String,
}

#[derive(Deserialize, Default)]
struct SecretResponse {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    warnings: Option<Vec<String>>,
}

impl VaultProvider {
    pub fn new(config: VaultConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Exchange the service account token for a Vault token
    #[instrument(skip(self))]
    async fn login(&self, addr: &str) -> Result<String> {
        let jwt = tokio::fs::read_to_string(&self.config.service_account_token_path)
            .await
            .map_err(|e| {
                CredentialsError::BackendFailure(format!(
                    "failed to read service account token {}: {}",
                    self.config.service_account_token_path, e
                ))
            })?;

        let url = api_url(addr, &format!("{}/login", self.config.auth_path));
        info!("Logging in to Vault at {} with role {}", url, self.config.role);

        let mut request = self.http.post(&url).json(&serde_json::json!({
            "role": self.config.role,
            "jwt": jwt.trim(),
        }));
        if let Some(ns) = &self.config.namespace {
            request = request.header(vault::NAMESPACE_HEADER, ns);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CredentialsError::BackendFailure(format!("Vault login failed: {}", e)))?;

        let login: LoginResponse = response.json().await.map_err(|e| {
            CredentialsError::BackendFailure(format!("invalid Vault login response: {}", e))
        })?;

        login
            .auth
            .map(|a| a.client_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                CredentialsError::BackendFailure("Vault login returned no client token".to_string())
            })
    }
}

#[async_trait]
impl SecretStoreProvider for VaultProvider {
    async fn connect(&self) -> Result<Box<dyn SecretStoreClient>> {
        let Some(addr) = self.config.addr.clone() else {
            return Err(CredentialsError::BackendFailure(
                "VAULT_ADDR is not set, cannot create a Vault client".to_string(),
            ));
        };

        let token = match &self.config.token {
            Some(token) => token.clone(),
            None => self.login(&addr).await?,
        };

        Ok(Box::new(VaultClient {
            http: self.http.clone(),
            addr,
            token,
            namespace: self.config.namespace.clone(),
        }))
    }
}

#[async_trait]
impl SecretStoreClient for VaultClient {
    #[instrument(skip(self))]
    async fn read_credentials(&self, path: &str) -> Result<(String, String)> {
        let url = api_url(&self.addr, path);
        debug!("Reading credentials from Vault at {}", url);

        let mut request = self.http.get(&url).header(vault::TOKEN_HEADER, &self.token);
        if let Some(ns) = &self.namespace {
            request = request.header(vault::NAMESPACE_HEADER, ns);
        }

        let response = request.send().await.map_err(|e| {
            CredentialsError::BackendFailure(format!("unable to read Vault secret {}: {}", path, e))
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return extract_credentials(path, SecretResponse::default());
        }

        let body: SecretResponse = response
            .error_for_status()
            .map_err(|e| {
                CredentialsError::BackendFailure(format!(
                    "unable to read Vault secret {}: {}",
                    path, e
                ))
            })?
            .json()
            .await
            .map_err(|e| {
                CredentialsError::BackendFailure(format!(
                    "invalid Vault response for {}: {}",
                    path, e
                ))
            })?;

        extract_credentials(path, body)
    }
}

fn api_url(addr: &str, path: &str) -> String {
    format!(
        "{}/v1/{}",
        addr.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pull `username` and `password` out of a KV v2 response (`data.data`)
fn extract_credentials(path: &str, response: SecretResponse) -> Result<(String, String)> {
    let fail = |reason: &str| {
        CredentialsError::BackendFailure(format!("Vault secret at {} {}", path, reason))
    };

    if let Some(warnings) = response.warnings.filter(|w| !w.is_empty()) {
        return Err(fail(&format!("returned warnings: {}", warnings.join("; "))));
    }

    let outer = response.data.ok_or_else(|| fail("does not exist"))?;
    if outer.is_empty() {
        return Err(fail("has an empty data map"));
    }

    let inner = match outer.get("data") {
        Some(Value::Object(inner)) => inner,
        Some(Value::Null) | None => return Err(fail("has no data.data map")),
        Some(_) => return Err(fail("has a data.data field that is not a map")),
    };

    let field = |key: &str| match inner.get(key) {
        Some(Value::String(v)) => Ok(v.clone()),
        Some(_) => Err(fail(&format!("has a non-string {} value", key))),
        None => Err(fail(&format!("has no {} value", key))),
    };

    Ok((field(secret_keys::USERNAME)?, field(secret_keys::PASSWORD)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parse(body: Value) -> SecretResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_api_url_joins_path() {
        assert_eq!(
            api_url("https://vault:8200/", "/secret/data/rmq"),
            "https://vault:8200/v1/secret/data/rmq"
        );
        assert_eq!(
            api_url("https://vault:8200", "auth/kubernetes/login"),
            "https://vault:8200/v1/auth/kubernetes/login"
        );
    }

    #[test]
    fn test_extract_credentials() {
        let body = parse(serde_json::json!({
            "data": {
                "data": {"username": "admin", "password": "s3cr3t"},
                "metadata": {"version": 2}
            },
            "warnings": null
        }));

        let (user, pass) = extract_credentials("secret/data/rmq", body).unwrap();
        assert_eq!(user, "admin");
        assert_eq!(pass, "s3cr3t");
    }

    #[test]
    fn test_extract_credentials_missing_secret() {
        let err = extract_credentials("secret/data/rmq", SecretResponse::default()).unwrap_err();
        assert!(err.to_string().contains("secret/data/rmq"));
        assert!(matches!(err, CredentialsError::BackendFailure(_)));
    }

    #[test]
    fn test_extract_credentials_with_warnings() {
        let body = parse(serde_json::json!({
            "data": {"data": {"username": "admin", "password": "s3cr3t"}},
            "warnings": ["deprecated path"]
        }));

        let err = extract_credentials("secret/data/rmq", body).unwrap_err();
        assert!(err.to_string().contains("deprecated path"));
    }

    #[test]
    fn test_extract_credentials_inner_not_a_map() {
        let body = parse(serde_json::json!({"data": {"data": "oops"}}));
        assert!(extract_credentials("p", body).is_err());
    }

    #[test]
    fn test_extract_credentials_missing_password() {
        let body = parse(serde_json::json!({"data": {"data": {"username": "admin"}}}));

        let err = extract_credentials("p", body).unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_extract_credentials_non_string_username() {
        let body = parse(serde_json::json!({"data": {"data": {"username": 1, "password": "x"}}}));

        let err = extract_credentials("p", body).unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[tokio::test]
    async fn test_connect_without_addr_fails() {
        let provider = VaultProvider::new(VaultConfig::default());

        let err = provider.connect().await.err().unwrap();
        assert!(matches!(err, CredentialsError::BackendFailure(_)));
    }

    #[tokio::test]
    async fn test_connect_with_static_token() {
        let provider = VaultProvider::new(VaultConfig {
            addr: Some("https://vault:8200".to_string()),
            token: Some("root".to_string()),
            ..Default::default()
        });

        assert!(provider.connect().await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_login_without_service_account_token_fails() {
        let provider = VaultProvider::new(VaultConfig {
            addr: Some("https://vault:8200".to_string()),
            service_account_token_path: "/nonexistent/token".to_string(),
            ..Default::default()
        });

        let err = provider.connect().await.err().unwrap();
        assert!(err.to_string().contains("/nonexistent/token"));
    }

    fn token_provider(server: &MockServer) -> VaultProvider {
        VaultProvider::new(VaultConfig {
            addr: Some(server.uri()),
            token: Some("root".to_string()),
            namespace: Some("team-a".to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_read_credentials_sends_token_and_namespace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/rmq1/default-user"))
            .and(header("X-Vault-Token", "root"))
            .and(header("X-Vault-Namespace", "team-a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "data": {"username": "admin", "password": "s3cr3t"},
                    "metadata": {"version": 1}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = token_provider(&server).connect().await.unwrap();
        let (user, pass) = client
            .read_credentials("secret/data/rmq1/default-user")
            .await
            .unwrap();

        assert_eq!(user, "admin");
        assert_eq!(pass, "s3cr3t");
    }

    #[tokio::test]
    async fn test_read_credentials_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"errors": []})),
            )
            .mount(&server)
            .await;

        let client = token_provider(&server).connect().await.unwrap();
        let err = client.read_credentials("secret/data/missing").await.unwrap_err();

        assert!(matches!(err, CredentialsError::BackendFailure(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_read_credentials_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/rmq1"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"errors": ["permission denied"]})),
            )
            .mount(&server)
            .await;

        let client = token_provider(&server).connect().await.unwrap();
        let err = client.read_credentials("secret/data/rmq1").await.unwrap_err();

        assert!(matches!(err, CredentialsError::BackendFailure(_)));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_connect_logs_in_with_service_account_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/kubernetes/login"))
            .and(body_json(serde_json::json!({
                "role": "messaging-topology-operator",
                "jwt": "sa-jwt"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "auth": {"client_token": "issued-token"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/rmq1"))
            .and(header("X-Vault-Token", "issued-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"data": {"username": "u", "password": "p"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut sa_token = tempfile::NamedTempFile::new().unwrap();
        writeln!(sa_token, "sa-jwt").unwrap();

        let provider = VaultProvider::new(VaultConfig {
            addr: Some(server.uri()),
            service_account_token_path: sa_token.path().display().to_string(),
            ..Default::default()
        });

        let client = provider.connect().await.unwrap();
        let (user, pass) = client.read_credentials("secret/data/rmq1").await.unwrap();

        assert_eq!(user, "u");
        assert_eq!(pass, "p");
    }

    #[tokio::test]
    async fn test_connect_login_without_client_token_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/kubernetes/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"auth": null})),
            )
            .mount(&server)
            .await;

        let mut sa_token = tempfile::NamedTempFile::new().unwrap();
        write!(sa_token, "sa-jwt").unwrap();

        let provider = VaultProvider::new(VaultConfig {
            addr: Some(server.uri()),
            service_account_token_path: sa_token.path().display().to_string(),
            ..Default::default()
        });

        let err = provider.connect().await.err().unwrap();
        assert!(err.to_string().contains("no client token"));
    }
}
