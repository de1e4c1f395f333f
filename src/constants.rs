// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "default";

/// Environment variables read by `ClusterOptions::from_env`
pub mod env {
    /// Namespace the helpers operate in
    pub const NAMESPACE: &str = "KUBE_NAMESPACE";
    /// Kubeconfig context to use (optional)
    pub const CONTEXT: &str = "KUBE_CONTEXT";
    /// Path to a kubeconfig file (optional)
    pub const KUBECONFIG: &str = "KUBECONFIG";
}

/// Messages reported by the readiness poller
pub mod messages {
    pub const STATEFUL_SET_AVAILABLE: &str = "StatefulSet is now available";
}
