// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reading credentials out of Kubernetes Secrets

use crate::constants::secret_keys;
use crate::error::{CredentialsError, Result};
use crate::types::ConnectionCredentials;
use k8s_openapi::api::core::v1::Secret;
use kube::ResourceExt;
use url::Url;

/// Read a connection Secret holding `username`, `password` and `uri`.
///
/// A `uri` without an `http://` or `https://` prefix gets `http://` prepended.
/// The returned flag is true iff the scheme is `https`.
pub fn from_payload(secret: &Secret) -> Result<(ConnectionCredentials, bool)> {
    let object = describe(secret);

    let Some(raw_uri) = value(secret, secret_keys::URI) else {
        return Err(CredentialsError::MissingField {
            object,
            field: secret_keys::URI,
        });
    };

    let raw_uri = std::str::from_utf8(raw_uri).map_err(|e| CredentialsError::MalformedData {
        object: object.clone(),
        reason: format!("uri is not valid UTF-8: {}", e),
    })?;

    let uri = if raw_uri.starts_with("http://") || raw_uri.starts_with("https://") {
        raw_uri.to_string()
    } else {
        format!("http://{}", raw_uri)
    };

    let parsed = Url::parse(&uri).map_err(|e| CredentialsError::MalformedData {
        object,
        reason: format!("invalid uri '{}': {}", uri, e),
    })?;
    let tls_enabled = parsed.scheme() == "https";

    let (username, password) = username_password(secret);
    Ok((ConnectionCredentials::new(username, password, uri), tls_enabled))
}

/// Username and password of a binding Secret, empty when absent
pub fn username_password(secret: &Secret) -> (Vec<u8>, Vec<u8>) {
    let username = value(secret, secret_keys::USERNAME).unwrap_or_default();
    let password = value(secret, secret_keys::PASSWORD).unwrap_or_default();
    (username.to_vec(), password.to_vec())
}

fn value<'a>(secret: &'a Secret, key: &str) -> Option<&'a [u8]> {
    secret
        .data
        .as_ref()
        .and_then(|d| d.get(key))
        .map(|v| v.0.as_slice())
}

fn describe(secret: &Secret) -> String {
    format!(
        "Secret {}/{}",
        secret.namespace().unwrap_or_default(),
        secret.name_any()
    )
}
