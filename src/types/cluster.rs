// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::annotations;
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

/// The subset of the RabbitmqCluster resource read when resolving references.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "rabbitmq.com", version = "v1beta1", kind = "RabbitmqCluster")]
#[kube(namespaced)]
#[kube(status = "RabbitmqClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct RabbitmqClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_backend: Option<SecretBackend>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretBackend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<VaultSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VaultSpec {
    /// Path of the default user credentials in Vault
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user_path: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RabbitmqClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<LocalReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<DefaultUser>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefaultUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_reference: Option<NamespacedReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct LocalReference {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct NamespacedReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl RabbitmqCluster {
    /// TLS is enabled when a TLS secret is configured
    pub fn tls_enabled(&self) -> bool {
        self.spec
            .tls
            .as_ref()
            .and_then(|t| t.secret_name.as_deref())
            .is_some_and(|name| !name.is_empty())
    }

    /// Vault path holding the default user credentials, if the cluster uses Vault
    pub fn vault_default_user_path(&self) -> Option<&str> {
        self.spec
            .secret_backend
            .as_ref()
            .and_then(|b| b.vault.as_ref())
            .and_then(|v| v.default_user_path.as_deref())
            .filter(|p| !p.is_empty())
    }

    /// Name of the Service exposing the management API
    pub fn service_reference(&self) -> Option<&NamespacedReference> {
        self.status
            .as_ref()
            .and_then(|s| s.default_user.as_ref())
            .and_then(|u| u.service_reference.as_ref())
    }

    /// Name of the Secret holding the default user binding
    pub fn binding(&self) -> Option<&LocalReference> {
        self.status.as_ref().and_then(|s| s.binding.as_ref())
    }

    /// Raw value of the allowed-namespaces annotation
    pub fn allowed_namespaces(&self) -> Option<&str> {
        self.annotations()
            .get(annotations::ALLOWED_NAMESPACES)
            .map(|s| s.as_str())
    }
}
