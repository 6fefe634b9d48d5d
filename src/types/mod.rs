// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Application manifest and desired-state types.

pub mod application;

pub use application::{
    ApplicationDestination, ApplicationManifest, ApplicationSource, ApplicationSpec, DesiredState,
    HelmParameter, HelmSource, SyncPolicy,
};
