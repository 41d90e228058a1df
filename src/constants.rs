// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys read from RabbitmqCluster objects
pub mod annotations {
    /// Comma-separated namespaces allowed to reference the cluster, `*` for any
    pub const ALLOWED_NAMESPACES: &str = "rabbitmq.com/topology-allowed-namespaces";
    pub const ANY_NAMESPACE: &str = "*";
}

/// Keys of a connection or binding Secret
pub mod secret_keys {
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const URI: &str = "uri";
}

/// Service port names exposing the management API
pub mod ports {
    pub const MANAGEMENT: &str = "management";
    pub const MANAGEMENT_TLS: &str = "management-tls";
}

/// Object kinds reported in lookup errors
pub mod kinds {
    pub const SECRET: &str = "Secret";
    pub const SERVICE: &str = "Service";
    pub const RABBITMQ_CLUSTER: &str = "RabbitmqCluster";
}

/// Field paths reported in `MissingField` errors
pub mod fields {
    pub const SERVICE_REFERENCE: &str = "status.defaultUser.serviceReference";
    pub const BINDING: &str = "status.binding";
}

/// Environment variables read by `Config::from_env`
pub mod env {
    pub const DOMAIN_NAME: &str = "MESSAGING_DOMAIN_NAME";
    pub const OPERATOR_NAMESPACE: &str = "OPERATOR_NAMESPACE";
    pub const VAULT_ADDR: &str = "VAULT_ADDR";
    pub const VAULT_TOKEN: &str = "VAULT_TOKEN";
    pub const VAULT_NAMESPACE: &str = "VAULT_NAMESPACE";
    pub const VAULT_ROLE: &str = "OPERATOR_VAULT_ROLE";
    pub const VAULT_AUTH_PATH: &str = "OPERATOR_VAULT_AUTH_PATH";
}

/// Vault defaults
pub mod vault {
    pub const DEFAULT_ROLE: &str = "messaging-topology-operator";
    pub const DEFAULT_AUTH_PATH: &str = "auth/kubernetes";
    pub const SERVICE_ACCOUNT_TOKEN_PATH: &str =
        "/var/run/secrets/kubernetes.io/serviceaccount/token";
    pub const TOKEN_HEADER: &str = "X-Vault-Token";
    pub const NAMESPACE_HEADER: &str = "X-Vault-Namespace";
}
