// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod hcgateway;
pub mod steps;
pub mod token;

pub use hcgateway::{HcGatewayClient, HcGatewayService};
pub use steps::{normalize_steps, StepsReport, StepsService};
pub use token::{TokenManager, TokenStatus};
