// ABOUTME: Core types and constants for the pacer race prediction engine
// ABOUTME: Foundation crate with data models, error handling, and fallback constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacer Core
//!
//! Foundation crate providing the shared records consumed and produced by the
//! prediction engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `AppError` and `ErrorCode` used at the collaborator boundary
//! - **constants**: Fallback paces, model thresholds and stop-time bands
//! - **models**: Activity analyses, performance profiles, courses and predictions

/// Unified error handling for the service boundary
pub mod errors;

/// Default values and model thresholds organized by domain
pub mod constants;

/// Core data models (`ActivityAnalysis`, `PerformanceProfile`, `Course`, predictions)
pub mod models;
