// ABOUTME: Core types and constants for the Pierre meal composition engine
// ABOUTME: Foundation crate with error handling, nutrition values, catalog and plan models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Meals Core
//!
//! Foundation crate providing shared types and constants for the meal
//! composition engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Energy conversion factors and default tuning values
//! - **models**: Nutrition values, macro profiles, catalog items and daily plans

/// Unified error handling system with standard error codes
pub mod errors;

/// Energy conversion factors and default tuning values
pub mod constants;

/// Core data models (nutrition, catalog items, daily plans)
pub mod models;
