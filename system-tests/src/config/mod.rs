// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for the Products scenario suite.
// Purpose: Provide typed access to test environment settings and defaults.
// Dependencies: url
// ============================================================================

//! ## Overview
//! System-test configuration is read from environment variables and mapped into
//! a small typed structure shared by the runner and the test helpers.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::AuditTarget;
pub use env::CI_RETRIES;
pub use env::DEFAULT_BASE_URL;
pub use env::DEFAULT_REQUEST_TIMEOUT;
pub use env::DEFAULT_SCENARIO_TIMEOUT;
pub use env::STDERR_AUDIT_LOG;
pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
pub use env::parse_base_url;
pub use env::read_env_strict;
