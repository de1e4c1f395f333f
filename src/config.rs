// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, DEFAULT_NAMESPACE};
use anyhow::{bail, Context, Result};
use kube::Client;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Where and how the helpers talk to the cluster
#[derive(Clone)]
pub struct ClusterOptions {
    /// Namespace all namespaced calls target
    pub namespace: String,
    /// Kubeconfig context; the current context is used when unset
    pub context: Option<String>,
    /// Kubeconfig file; inferred from the environment when unset
    pub config_path: Option<PathBuf>,
    client: Option<Client>,
}

impl ClusterOptions {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            context: None,
            config_path: None,
            client: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use an already constructed client instead of loading a kubeconfig
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub(crate) fn injected_client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    /// Load options from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build options from `lookup`, which maps a variable name to its value
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let namespace = match lookup(vars::NAMESPACE) {
            Some(ns) => {
                validate_namespace(&ns)
                    .with_context(|| format!("{} is not a valid namespace", vars::NAMESPACE))?;
                ns
            }
            None => DEFAULT_NAMESPACE.to_string(),
        };

        let mut options = Self::new(namespace);
        options.context = lookup(vars::CONTEXT).filter(|c| !c.is_empty());
        options.config_path = lookup(vars::KUBECONFIG)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(options)
    }
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl fmt::Debug for ClusterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterOptions")
            .field("namespace", &self.namespace)
            .field("context", &self.context)
            .field("config_path", &self.config_path)
            .field("client", &self.client.as_ref().map(|_| "<injected>"))
            .finish()
    }
}

/// Namespaces must be RFC 1123 labels
fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() || namespace.len() > 63 {
        bail!("namespace must be 1-63 characters, got {}", namespace.len());
    }
    let valid_chars = namespace
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || namespace.starts_with('-') || namespace.ends_with('-') {
        bail!("'{}' must consist of lowercase alphanumerics or '-'", namespace);
    }
    Ok(())
}
