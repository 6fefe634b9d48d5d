// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Controller REST API access.

pub mod gateway;
pub mod transport;

pub use gateway::{ApiGateway, Deletion};
pub use transport::ReqwestTransport;
