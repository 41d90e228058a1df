// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of cluster references into connection credentials.

pub mod access;
pub mod endpoint;
pub mod secret_reader;

use crate::constants::{fields, kinds};
use crate::error::{CredentialsError, Result};
use crate::kubernetes::get_namespaced;
use crate::secret_store::SecretStoreProvider;
use crate::types::{
    ConnectionCredentials, RabbitmqCluster, RabbitmqClusterReference, ResolutionTarget,
};
use k8s_openapi::api::core::v1::{Secret, Service};
use kube::Client;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub use access::is_allowed;
pub use endpoint::build_uri;

/// Resolves references to RabbitmqClusters or connection Secrets into credentials
/// for the cluster's management API. Every call reads current state from the API.
#[derive(Clone)]
pub struct ReferenceResolver {
    client: Client,
    secret_store: Arc<dyn SecretStoreProvider>,
}

impl ReferenceResolver {
    pub fn new(client: Client, secret_store: Arc<dyn SecretStoreProvider>) -> Self {
        Self {
            client,
            secret_store,
        }
    }

    /// Resolve `reference` on behalf of a resource in `requesting_namespace`.
    ///
    /// Returns the credentials and whether the management endpoint uses TLS.
    #[instrument(skip(self, reference), fields(cluster = %reference.name), err)]
    pub async fn resolve(
        &self,
        reference: &RabbitmqClusterReference,
        requesting_namespace: &str,
        domain_suffix: &str,
    ) -> Result<(ConnectionCredentials, bool)> {
        match reference.target() {
            ResolutionTarget::DirectSecret { name } => {
                self.resolve_connection_secret(requesting_namespace, name).await
            }
            ResolutionTarget::ManagedCluster { name, namespace } => {
                let namespace = namespace.unwrap_or(requesting_namespace);
                self.resolve_cluster(
                    reference,
                    requesting_namespace,
                    namespace,
                    name,
                    domain_suffix,
                )
                .await
            }
        }
    }

    async fn resolve_connection_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(ConnectionCredentials, bool)> {
        debug!("Reading connection secret {}/{}", namespace, name);
        let secret: Secret = get_namespaced(&self.client, namespace, name).await?;
        secret_reader::from_payload(&secret)
    }

    async fn resolve_cluster(
        &self,
        reference: &RabbitmqClusterReference,
        requesting_namespace: &str,
        namespace: &str,
        name: &str,
        domain_suffix: &str,
    ) -> Result<(ConnectionCredentials, bool)> {
        let cluster: RabbitmqCluster = get_namespaced(&self.client, namespace, name).await?;

        if !access::is_allowed(reference, requesting_namespace, &cluster) {
            return Err(CredentialsError::AccessDenied {
                namespace: namespace.to_string(),
                name: name.to_string(),
                requesting_namespace: requesting_namespace.to_string(),
            });
        }

        let Some(service_ref) = cluster.service_reference() else {
            return Err(CredentialsError::MissingField {
                object: format!("{} {}/{}", kinds::RABBITMQ_CLUSTER, namespace, name),
                field: fields::SERVICE_REFERENCE,
            });
        };

        let (username, password) = match cluster.vault_default_user_path() {
            Some(path) => {
                debug!("Reading default user of {}/{} from secret store", namespace, name);
                let store = self.secret_store.connect().await?;
                let (username, password) = store.read_credentials(path).await?;
                (username.into_bytes(), password.into_bytes())
            }
            None => {
                let Some(binding) = cluster.binding() else {
                    return Err(CredentialsError::MissingField {
                        object: format!("{} {}/{}", kinds::RABBITMQ_CLUSTER, namespace, name),
                        field: fields::BINDING,
                    });
                };
                let secret: Secret = get_namespaced(&self.client, namespace, &binding.name).await?;
                secret_reader::username_password(&secret)
            }
        };

        let service: Service = get_namespaced(&self.client, namespace, &service_ref.name).await?;
        let tls_enabled = cluster.tls_enabled();
        let uri = endpoint::build_uri(&service, tls_enabled, domain_suffix)?;

        info!("Resolved RabbitmqCluster {}/{} to {}", namespace, name, uri);
        Ok((ConnectionCredentials::new(username, password, uri), tls_enabled))
    }
}
