// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Management endpoint derivation

use crate::constants::ports;
use crate::error::{CredentialsError, Result};
use k8s_openapi::api::core::v1::Service;
use kube::ResourceExt;

/// Build the management API URI of a Service.
///
/// A `management-tls` port wins over `management`. The scheme follows `tls_enabled`,
/// not the name of the port that was found.
pub fn build_uri(service: &Service, tls_enabled: bool, domain_suffix: &str) -> Result<String> {
    let named_ports = service
        .spec
        .as_ref()
        .and_then(|s| s.ports.as_ref())
        .map(|p| p.as_slice())
        .unwrap_or_default();

    let find = |name: &str| {
        named_ports
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .map(|p| p.port)
    };

    let Some(port) = find(ports::MANAGEMENT_TLS).or_else(|| find(ports::MANAGEMENT)) else {
        return Err(CredentialsError::NoManagementPort {
            namespace: service.namespace().unwrap_or_default(),
            name: service.name_any(),
        });
    };

    let scheme = if tls_enabled { "https" } else { "http" };
    Ok(format!(
        "{}://{}.{}.svc{}:{}",
        scheme,
        service.name_any(),
        service.namespace().unwrap_or_default(),
        domain_suffix,
        port
    ))
}
