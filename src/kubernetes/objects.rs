// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespaced object lookups

use crate::error::{CredentialsError, Result};
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Fetch a namespaced object, mapping a missing object to `CredentialsError::NotFound`.
/// Any other API failure is returned as `CredentialsError::Kube`.
#[instrument(skip(client))]
pub async fn get_namespaced<K>(client: &Client, namespace: &str, name: &str) -> Result<K>
where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let api: Api<K> = Api::namespaced(client.clone(), namespace);

    match api.get_opt(name).await? {
        Some(object) => Ok(object),
        None => {
            debug!("{} {}/{} not found", K::kind(&()), namespace, name);
            Err(CredentialsError::NotFound {
                kind: K::kind(&()).to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
        }
    }
}
