// ABOUTME: Unified error handling for the meal engine library
// ABOUTME: Re-exports the foundation error types so callers depend on one path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Error types live in `pierre-meals-core` so the models crate and the
//! engine share them. This module re-exports them under `crate::errors`.

pub use pierre_meals_core::errors::*;
