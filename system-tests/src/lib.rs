// system-tests/src/lib.rs
// ============================================================================
// Module: Products System Tests Library
// Description: Configuration, assertions, and runner for the scenario suite.
// Purpose: Share the scenario plumbing between the stub and live test binaries.
// Dependencies: products-client, products-contract, tokio, url
// ============================================================================

//! ## Overview
//! This crate hosts everything a scenario needs except the scenarios
//! themselves, which live in `system-tests/tests/suites`:
//!
//! - [`config`] resolves the base URL, timeouts, retries, and worker limit from
//!   the environment before any scenario runs.
//! - [`assertions`] maps responses onto typed bodies or a classified
//!   [`assertions::ScenarioError`].
//! - [`runner`] executes scenarios with a fresh controller per attempt.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assertions;
pub mod config;
pub mod runner;
