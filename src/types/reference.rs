// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster references as embedded in topology resource specs

use serde::{Deserialize, Serialize};

/// Points at either a RabbitmqCluster or a Secret holding connection details.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RabbitmqClusterReference {
    /// Name of the RabbitmqCluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Namespace of the RabbitmqCluster, defaults to the namespace of the referencing resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Secret in the referencing resource's namespace with `username`, `password` and `uri`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_secret: Option<ConnectionSecretReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
pub struct ConnectionSecretReference {
    pub name: String,
}

/// Which of the two resolution paths a reference takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionTarget<'a> {
    /// A connection Secret in the requesting namespace
    DirectSecret { name: &'a str },
    /// A RabbitmqCluster, possibly in another namespace
    ManagedCluster {
        name: &'a str,
        namespace: Option<&'a str>,
    },
}

impl RabbitmqClusterReference {
    pub fn for_cluster(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn for_secret(name: &str) -> Self {
        Self {
            connection_secret: Some(ConnectionSecretReference {
                name: name.to_string(),
            }),
            ..Default::default()
        }
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Explicit namespace of the reference; empty counts as unset
    pub fn explicit_namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// A connection secret takes precedence over the cluster name
    pub fn target(&self) -> ResolutionTarget<'_> {
        match &self.connection_secret {
            Some(secret) => ResolutionTarget::DirectSecret { name: &secret.name },
            None => ResolutionTarget::ManagedCluster {
                name: &self.name,
                namespace: self.explicit_namespace(),
            },
        }
    }
}
