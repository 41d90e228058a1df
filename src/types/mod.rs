// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes resource and reference types.

pub mod cluster;
pub mod credentials;
pub mod reference;

pub use cluster::RabbitmqCluster;
pub use credentials::ConnectionCredentials;
pub use reference::{RabbitmqClusterReference, ResolutionTarget};
