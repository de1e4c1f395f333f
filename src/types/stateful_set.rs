// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::api::apps::v1::StatefulSet;

/// Readiness accessors for StatefulSet snapshots
pub trait StatefulSetExt {
    /// spec.replicas, which the API server defaults to 1
    fn desired_replicas(&self) -> i32;
    fn ready_replicas(&self) -> i32;

    /// Check if all desired pods are ready at the time of the snapshot
    fn is_available(&self) -> bool {
        self.ready_replicas() == self.desired_replicas()
    }
}

impl StatefulSetExt for StatefulSet {
    fn desired_replicas(&self) -> i32 {
        self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1)
    }

    fn ready_replicas(&self) -> i32 {
        self.status
            .as_ref()
            .and_then(|s| s.ready_replicas)
            .unwrap_or(0)
    }
}
