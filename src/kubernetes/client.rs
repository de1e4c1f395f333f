// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client construction from cluster options

use crate::config::ClusterOptions;
use crate::error::{Error, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, instrument};

/// Build a client for the cluster described by `options`.
///
/// An injected client wins; otherwise the kubeconfig file, then the named
/// context, then the usual in-cluster / `KUBECONFIG` inference.
#[instrument(skip(options), fields(namespace = %options.namespace))]
pub async fn create_client(options: &ClusterOptions) -> Result<Client> {
    if let Some(client) = options.injected_client() {
        return Ok(client.clone());
    }

    let kube_opts = KubeConfigOptions {
        context: options.context.clone(),
        ..Default::default()
    };

    let config = match (&options.config_path, &options.context) {
        (Some(path), _) => config_from_file(path, &kube_opts).await?,
        (None, Some(_)) => KConfig::from_kubeconfig(&kube_opts).await.map_err(|e| {
            Error::Kubeconfig(format!("Failed to load kubeconfig context: {}", e))
        })?,
        (None, None) => KConfig::infer()
            .await
            .map_err(|e| Error::Kubeconfig(format!("Failed to infer config: {}", e)))?,
    };

    debug!("Using cluster {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| Error::Kubeconfig(format!("Failed to create client: {}", e)))
}

async fn config_from_file(path: &Path, kube_opts: &KubeConfigOptions) -> Result<KConfig> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        Error::Kubeconfig(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    KConfig::from_custom_kubeconfig(kubeconfig, kube_opts)
        .await
        .map_err(|e| Error::Kubeconfig(format!("Failed to create config: {}", e)))
}
