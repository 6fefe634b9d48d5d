// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciler that drives the configured action against the controller.

pub mod application;

pub use application::{ApplicationReconciler, Outcome};
