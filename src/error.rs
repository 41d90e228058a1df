// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{fields, kinds};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("{kind} {namespace}/{name} does not exist")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    #[error(
        "namespace {requesting_namespace} is not allowed to reference \
         RabbitmqCluster {namespace}/{name}; check the cluster's \
         `rabbitmq.com/topology-allowed-namespaces` annotation"
    )]
    AccessDenied {
        namespace: String,
        name: String,
        requesting_namespace: String,
    },

    #[error("{object} has no {field} set")]
    MissingField { object: String, field: &'static str },

    #[error("failed to find 'management' or 'management-tls' port in Service {namespace}/{name}")]
    NoManagementPort { namespace: String, name: String },

    #[error("Secret store error: {0}")]
    BackendFailure(String),

    #[error("Malformed data in {object}: {reason}")]
    MalformedData { object: String, reason: String },

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
}

impl CredentialsError {
    /// The referenced RabbitmqCluster does not exist
    pub fn is_cluster_not_found(&self) -> bool {
        matches!(self, CredentialsError::NotFound { kind, .. } if kind == kinds::RABBITMQ_CLUSTER)
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, CredentialsError::AccessDenied { .. })
    }

    /// The cluster exists but has not published its default user Service yet
    pub fn is_no_service_reference(&self) -> bool {
        matches!(
            self,
            CredentialsError::MissingField { field, .. } if *field == fields::SERVICE_REFERENCE
        )
    }

    /// Outcomes a caller should report to the user rather than retry
    pub fn is_terminal(&self) -> bool {
        self.is_cluster_not_found() || self.is_access_denied() || self.is_no_service_reference()
    }
}

pub type Result<T> = std::result::Result<T, CredentialsError>;
