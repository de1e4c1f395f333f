// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! StatefulSet lookup and readiness polling.
//!
//! Every helper comes in two flavours: `try_*` returns the error, the plain
//! name panics with it so a test fails on the spot.

use crate::config::ClusterOptions;
use crate::constants::messages;
use crate::error::{Error, Result};
use crate::kubernetes::create_client;
use crate::retry::{do_with_retry, Attempt, RetryError};
use crate::types::StatefulSetExt;
use k8s_openapi::api::apps::v1::StatefulSet;
use kube::{api::ListParams, Api, ResourceExt};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

async fn stateful_sets(options: &ClusterOptions) -> Result<Api<StatefulSet>> {
    let client = create_client(options).await?;
    Ok(Api::namespaced(client, &options.namespace))
}

/// List the StatefulSets in the options' namespace that match `filters`
#[instrument(skip(options, filters), fields(namespace = %options.namespace))]
pub async fn try_list_stateful_sets(
    options: &ClusterOptions,
    filters: &ListParams,
) -> Result<Vec<StatefulSet>> {
    let list = stateful_sets(options).await?.list(filters).await?;
    debug!("Found {} StatefulSets", list.items.len());
    Ok(list.items)
}

/// Like [`try_list_stateful_sets`], panicking on error
pub async fn list_stateful_sets(options: &ClusterOptions, filters: &ListParams) -> Vec<StatefulSet> {
    try_list_stateful_sets(options, filters)
        .await
        .unwrap_or_else(|e| panic!("Failed to list StatefulSets in {}: {}", options.namespace, e))
}

/// Get a StatefulSet by name from the options' namespace
#[instrument(skip(options), fields(namespace = %options.namespace))]
pub async fn try_get_stateful_set(options: &ClusterOptions, name: &str) -> Result<StatefulSet> {
    Ok(stateful_sets(options).await?.get(name).await?)
}

/// Like [`try_get_stateful_set`], panicking on error
pub async fn get_stateful_set(options: &ClusterOptions, name: &str) -> StatefulSet {
    try_get_stateful_set(options, name).await.unwrap_or_else(|e| {
        panic!(
            "Failed to get StatefulSet {}/{}: {}",
            options.namespace, name, e
        )
    })
}

/// True when every desired replica is ready; desired defaults to 1
pub fn is_stateful_set_available(stateful_set: &StatefulSet) -> bool {
    stateful_set.is_available()
}

fn not_available(stateful_set: &StatefulSet) -> Error {
    Error::StatefulSetNotAvailable {
        name: stateful_set.name_any(),
        namespace: stateful_set.namespace().unwrap_or_default(),
        ready: stateful_set.ready_replicas(),
        desired: stateful_set.desired_replicas(),
    }
}

/// Poll until all pods of the StatefulSet are ready.
///
/// Fetch errors end the wait at once. A StatefulSet that is still not
/// available after `max_attempts` fetches yields [`Error::Timeout`] carrying
/// the last observed replica counts.
#[instrument(skip(options), fields(namespace = %options.namespace))]
pub async fn try_wait_until_stateful_set_available(
    options: &ClusterOptions,
    name: &str,
    max_attempts: u32,
    interval: Duration,
) -> Result<String> {
    let description = format!("Wait for StatefulSet {} to be provisioned", name);

    let outcome = do_with_retry(&description, max_attempts, interval, move || async move {
        let stateful_set = try_get_stateful_set(options, name)
            .await
            .map_err(Attempt::Fatal)?;
        if !stateful_set.is_available() {
            return Err(Attempt::Retry(not_available(&stateful_set)));
        }
        Ok(messages::STATEFUL_SET_AVAILABLE.to_string())
    })
    .await;

    match outcome {
        Ok(message) => {
            info!("{}", message);
            Ok(message)
        }
        Err(RetryError::Fatal(e)) => Err(e),
        Err(RetryError::MaxAttemptsExceeded {
            description,
            attempts,
            last,
        }) => {
            let err = Error::Timeout {
                description,
                attempts,
                source: Box::new(last),
            };
            warn!("Timed out waiting for StatefulSet to be provisioned: {}", err);
            Err(err)
        }
    }
}

/// Like [`try_wait_until_stateful_set_available`], panicking on error
pub async fn wait_until_stateful_set_available(
    options: &ClusterOptions,
    name: &str,
    max_attempts: u32,
    interval: Duration,
) {
    if let Err(e) = try_wait_until_stateful_set_available(options, name, max_attempts, interval).await
    {
        panic!("{}", e);
    }
}
