// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helpers for integration tests that assert on Kubernetes workloads.

pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod logging;
pub mod retry;
pub mod test_utils;
pub mod types;
pub mod workloads;

pub use config::ClusterOptions;
pub use error::{Error, Result};
