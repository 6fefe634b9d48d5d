// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Convergence polling after a sync.

pub mod poller;

pub use poller::{ConvergencePoller, RetryBudget};
