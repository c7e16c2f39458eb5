// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for the Products scenario suite.
// Purpose: Provide the stub API, harness, and artifact utilities.
// Dependencies: system-tests, products-client, products-contract
// ============================================================================

//! ## Overview
//! Shared helpers for the Products scenario suite. Test binaries pick a
//! target with [`harness::stub_harness`] or [`harness::live_harness`] and
//! declare scenarios with [`scenario_tests!`].

#![allow(dead_code, reason = "Shared helpers are reused across multiple test binaries.")]

pub mod artifacts;
pub mod harness;
pub mod stub_api;

/// Declares one `#[tokio::test]` per scenario function in `$suite`, each run
/// through the harness returned by `$harness`.
macro_rules! scenario_tests {
    ($harness:path => $suite:ident { $($name:ident),* $(,)? }) => {
        $(
            #[tokio::test(flavor = "multi_thread")]
            async fn $name() {
                let harness = match $harness() {
                    Ok(harness) => harness,
                    Err(err) => panic!("harness setup failed: {err}"),
                };
                if let Err(err) = harness.run(stringify!($name), $suite::$name).await {
                    panic!("{err}");
                }
            }
        )*
    };
}
