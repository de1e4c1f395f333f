// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to build Kubernetes client: {0}")]
    Kubeconfig(String),

    #[error(
        "StatefulSet {namespace}/{name} is not available: {ready} of {desired} replicas ready"
    )]
    StatefulSetNotAvailable {
        name: String,
        namespace: String,
        ready: i32,
        desired: i32,
    },

    #[error("'{description}' unsuccessful after {attempts} attempts: {source}")]
    Timeout {
        description: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Namespace operation failed: {0}")]
    Namespace(String),
}

impl Error {
    /// True when the API server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Kube(kube::Error::Api(resp)) if resp.code == 404)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use kube::error::ErrorResponse;

    fn api_error(code: u16) -> Error {
        Error::Kube(kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: "boom".to_string(),
            reason: "Whatever".to_string(),
            code,
        }))
    }

    #[test]
    fn test_is_not_found_for_404() {
        assert!(api_error(404).is_not_found());
    }

    #[test]
    fn test_is_not_found_for_other_codes() {
        assert!(!api_error(500).is_not_found());
        assert!(!Error::Kubeconfig("no config".to_string()).is_not_found());
    }

    #[test]
    fn test_timeout_message_includes_last_state() {
        let err = Error::Timeout {
            description: "Wait for StatefulSet web".to_string(),
            attempts: 3,
            source: Box::new(Error::StatefulSetNotAvailable {
                name: "web".to_string(),
                namespace: "ns".to_string(),
                ready: 0,
                desired: 2,
            }),
        };

        assert_eq!(
            err.to_string(),
            "'Wait for StatefulSet web' unsuccessful after 3 attempts: \
             StatefulSet ns/web is not available: 0 of 2 replicas ready"
        );
    }
}
