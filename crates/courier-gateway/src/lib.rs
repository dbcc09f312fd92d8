// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP front end for the Courier relay.
//!
//! Mounts the relay on a single axum route behind CORS, request tracing,
//! panic recovery and a request body limit.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, router, start_server, with_layers};
