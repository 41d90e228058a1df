// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use kube::Client;
use std::sync::Arc;
use tracing::info;

use topology_credentials::config::Config;
use topology_credentials::resolver::ReferenceResolver;
use topology_credentials::secret_store::VaultProvider;
use topology_credentials::types::reference::{ConnectionSecretReference, RabbitmqClusterReference};

/// Resolve a RabbitmqCluster reference into its management endpoint
#[derive(Parser, Debug)]
#[command(name = "topology-credentials", version)]
struct Args {
    /// Namespace of the resource holding the reference
    /// (defaults to OPERATOR_NAMESPACE, then "default")
    #[arg(long)]
    namespace: Option<String>,

    /// Name of the RabbitmqCluster
    #[arg(long, required_unless_present = "connection_secret")]
    cluster: Option<String>,

    /// Namespace of the RabbitmqCluster, if different from --namespace
    #[arg(long)]
    cluster_namespace: Option<String>,

    /// Secret holding `username`, `password` and `uri` instead of a RabbitmqCluster
    #[arg(long, conflicts_with_all = ["cluster", "cluster_namespace"])]
    connection_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let requesting_namespace = args
        .namespace
        .or_else(|| config.operator_namespace.clone())
        .unwrap_or_else(|| "default".to_string());

    let reference = RabbitmqClusterReference {
        name: args.cluster.unwrap_or_default(),
        namespace: args.cluster_namespace,
        connection_secret: args
            .connection_secret
            .map(|name| ConnectionSecretReference { name }),
    };

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let secret_store = Arc::new(VaultProvider::new(config.vault.clone()));
    let resolver = ReferenceResolver::new(client, secret_store);
    let (credentials, tls_enabled) = resolver
        .resolve(&reference, &requesting_namespace, &config.domain_suffix)
        .await?;

    info!(
        "Management endpoint {} (tls: {}, user: {})",
        credentials.uri(),
        tls_enabled,
        String::from_utf8_lossy(credentials.username())
    );
    println!("{}", credentials.uri());

    Ok(())
}
