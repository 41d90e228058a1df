// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cross-namespace access policy

use crate::constants::annotations;
use crate::types::{RabbitmqCluster, RabbitmqClusterReference};

/// Check whether `requesting_namespace` may use the cluster a reference points at.
///
/// References without an explicit namespace, or naming the requester's own namespace,
/// are always allowed. Otherwise the cluster's allow-list annotation must contain the
/// requesting namespace verbatim or `*`.
pub fn is_allowed(
    reference: &RabbitmqClusterReference,
    requesting_namespace: &str,
    cluster: &RabbitmqCluster,
) -> bool {
    match reference.explicit_namespace() {
        None => true,
        Some(ns) if ns == requesting_namespace => true,
        Some(_) => cluster.allowed_namespaces().is_some_and(|list| {
            list.split(',').any(|allowed| {
                allowed == requesting_namespace || allowed == annotations::ANY_NAMESPACE
            })
        }),
    }
}
