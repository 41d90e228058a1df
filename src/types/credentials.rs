// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::secret_keys;
use std::fmt;

/// Credentials and management endpoint of a RabbitMQ cluster.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionCredentials {
    username: Vec<u8>,
    password: Vec<u8>,
    uri: String,
}

impl ConnectionCredentials {
    pub fn new(
        username: impl Into<Vec<u8>>,
        password: impl Into<Vec<u8>>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            uri: uri.into(),
        }
    }

    pub fn username(&self) -> &[u8] {
        &self.username
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Look up a value by its secret key (`username`, `password` or `uri`)
    pub fn data(&self, key: &str) -> Option<&[u8]> {
        match key {
            secret_keys::USERNAME => Some(&self.username),
            secret_keys::PASSWORD => Some(&self.password),
            secret_keys::URI => Some(self.uri.as_bytes()),
            _ => None,
        }
    }
}

impl fmt::Debug for ConnectionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionCredentials")
            .field("username", &String::from_utf8_lossy(&self.username))
            .field("password", &"<redacted>")
            .field("uri", &self.uri)
            .finish()
    }
}
