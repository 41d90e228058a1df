// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! External secret stores holding default user credentials.

pub mod vault;

use crate::error::Result;
use async_trait::async_trait;

pub use vault::VaultProvider;

/// A connected secret store
#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    /// Read the username and password stored at `path`
    async fn read_credentials(&self, path: &str) -> Result<(String, String)>;
}

/// Creates secret store clients. Injected into the resolver so deployments and tests
/// can choose the backend.
#[async_trait]
pub trait SecretStoreProvider: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn SecretStoreClient>>;
}
