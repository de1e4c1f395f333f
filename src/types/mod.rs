// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Extension traits over Kubernetes API types.

pub mod stateful_set;

pub use stateful_set::StatefulSetExt;
