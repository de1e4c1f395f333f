// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for workload resources.

pub mod stateful_set;

pub use stateful_set::{
    get_stateful_set, is_stateful_set_available, list_stateful_sets, try_get_stateful_set,
    try_list_stateful_sets, try_wait_until_stateful_set_available,
    wait_until_stateful_set_available,
};
