// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Tests against a real cluster, taken from the current kubeconfig.
//!
//! Run with `cargo test -- --ignored`.

use futures::FutureExt;
use k8s_openapi::api::apps::v1::StatefulSet;
use k8s_openapi::api::core::v1::Namespace;
use kube::api::{ListParams, PostParams};
use kube::{Api, ResourceExt};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kubeassert::kubernetes::{create_client, delete_namespace, ensure_namespace_exists};
use kubeassert::workloads::{
    get_stateful_set, list_stateful_sets, try_get_stateful_set, wait_until_stateful_set_available,
};
use kubeassert::{logging, ClusterOptions};

const STATEFUL_SET_YAML: &str = r#"
apiVersion: apps/v1
kind: StatefulSet
metadata:
  name: nginx-statefulset
  labels:
    app: nginx
spec:
  updateStrategy:
    rollingUpdate:
      partition: 0
  serviceName: nginx
  selector:
    matchLabels:
      app: nginx
  template:
    metadata:
      labels:
        app: nginx
    spec:
      containers:
      - name: nginx
        image: nginx:1.15.7
        ports:
        - containerPort: 80
        readinessProbe:
          httpGet:
            path: /
            port: 80
"#;

/// Fresh namespace for one test
struct Fixture {
    options: ClusterOptions,
}

impl Fixture {
    async fn setup() -> anyhow::Result<Self> {
        logging::init();

        let namespace = format!("kubeassert-{}", uuid::Uuid::new_v4().simple())[..24].to_string();
        let options = ClusterOptions::new(namespace.clone());
        let client = create_client(&options).await?;
        ensure_namespace_exists(&client, &namespace).await?;

        Ok(Self { options })
    }

    async fn teardown(self) -> anyhow::Result<()> {
        let client = create_client(&self.options).await?;
        delete_namespace(&client, &self.options.namespace).await?;
        Ok(())
    }
}

async fn apply_stateful_set(options: &ClusterOptions) -> anyhow::Result<()> {
    let client = create_client(options).await?;
    let stateful_set: StatefulSet = serde_yaml::from_str(STATEFUL_SET_YAML)?;
    Api::<StatefulSet>::namespaced(client, &options.namespace)
        .create(&PostParams::default(), &stateful_set)
        .await?;
    Ok(())
}

/// Run `body` against a namespace holding the nginx StatefulSet.
///
/// The body runs on its own task so the namespace is deleted even when it
/// panics; the panic is re-raised afterwards.
async fn with_stateful_set<F, Fut>(body: F) -> anyhow::Result<()>
where
    F: FnOnce(ClusterOptions) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let fixture = Fixture::setup().await?;
    let options = fixture.options.clone();
    let run = body(options.clone());
    let outcome = tokio::spawn(async move {
        apply_stateful_set(&options).await?;
        run.await;
        anyhow::Ok(())
    })
    .await;

    fixture.teardown().await?;

    match outcome {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(e.into()),
    }
}

#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn get_stateful_set_returns_error_when_missing() {
    logging::init();
    let options = ClusterOptions::default();
    assert!(try_get_stateful_set(&options, "nginx-statefulset-missing")
        .await
        .is_err());
}

#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn get_stateful_set_by_name() -> anyhow::Result<()> {
    with_stateful_set(|options| async move {
        let sts = get_stateful_set(&options, "nginx-statefulset").await;
        assert_eq!(sts.name_any(), "nginx-statefulset");
        assert_eq!(sts.namespace(), Some(options.namespace.clone()));
    })
    .await
}

#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn list_stateful_sets_in_namespace() -> anyhow::Result<()> {
    with_stateful_set(|options| async move {
        let items = list_stateful_sets(&options, &ListParams::default()).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name_any(), "nginx-statefulset");
        assert_eq!(items[0].namespace(), Some(options.namespace.clone()));

        let none = list_stateful_sets(&options, &ListParams::default().labels("app=other")).await;
        assert!(none.is_empty());
    })
    .await
}

#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn wait_until_stateful_set_becomes_available() -> anyhow::Result<()> {
    with_stateful_set(|options| async move {
        wait_until_stateful_set_available(&options, "nginx-statefulset", 60, Duration::from_secs(1))
            .await;
    })
    .await
}

/// A failing body must still leave the cluster clean
#[tokio::test]
#[ignore = "requires a Kubernetes cluster"]
async fn namespace_is_deleted_when_test_body_panics() -> anyhow::Result<()> {
    let namespace = Arc::new(Mutex::new(String::new()));
    let seen = namespace.clone();

    let outcome = AssertUnwindSafe(with_stateful_set(move |options| async move {
        *seen.lock().unwrap() = options.namespace.clone();
        assert!(options.namespace.is_empty(), "deliberate failure");
    }))
    .catch_unwind()
    .await;
    assert!(outcome.is_err());

    let namespace = namespace.lock().unwrap().clone();
    let client = create_client(&ClusterOptions::default()).await?;
    let namespaces: Api<Namespace> = Api::all(client);
    let remaining = namespaces.get_opt(&namespace).await?;
    assert!(remaining.map_or(true, |ns| ns.metadata.deletion_timestamp.is_some()));
    Ok(())
}
