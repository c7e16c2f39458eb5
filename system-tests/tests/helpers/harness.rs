// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Suite Harness
// Description: Wires configuration, runner, reporter, and target together.
// Purpose: Give each scenario test a one-line entry point.
// Dependencies: system-tests, products-client, tokio
// ============================================================================

use std::future::Future;
use std::sync::Arc;
use std::sync::OnceLock;

use products_client::ProductsController;
use products_client::ReqwestTransport;
use system_tests::assertions::ScenarioError;
use system_tests::config::SystemTestConfig;
use system_tests::config::parse_base_url;
use system_tests::runner::ReqwestFactory;
use system_tests::runner::ScenarioRunner;
use system_tests::runner::open_audit_sink;
use tokio::sync::Semaphore;

use super::artifacts::TestReporter;
use super::stub_api::StubApiHandle;
use super::stub_api::spawn_stub_api;

/// Returns the process-wide worker slots, sized on first use.
fn shared_permits(workers: usize) -> Arc<Semaphore> {
    static PERMITS: OnceLock<Arc<Semaphore>> = OnceLock::new();
    Arc::clone(PERMITS.get_or_init(|| Arc::new(Semaphore::new(workers.max(1)))))
}

/// Scenario harness bound to one target API.
pub struct SuiteHarness {
    config: SystemTestConfig,
    target: &'static str,
    runner: ScenarioRunner<ReqwestFactory>,
    stub: Option<StubApiHandle>,
}

/// Builds a harness against a fresh in-process stub API.
pub fn stub_harness() -> Result<SuiteHarness, String> {
    let config = SystemTestConfig::load()?;
    let stub = spawn_stub_api()?;
    let base_url = parse_base_url(stub.base_url()).map_err(|err| format!("stub url {err}"))?;
    build(config.with_base_url(base_url), "stub", Some(stub))
}

/// Builds a harness against the configured remote API.
pub fn live_harness() -> Result<SuiteHarness, String> {
    build(SystemTestConfig::load()?, "live", None)
}

fn build(
    config: SystemTestConfig,
    target: &'static str,
    stub: Option<StubApiHandle>,
) -> Result<SuiteHarness, String> {
    let mut runner = ScenarioRunner::new(ReqwestFactory::from_config(&config), &config)
        .with_permits(shared_permits(config.workers));
    if let Some(target) = &config.audit_log {
        let sink = open_audit_sink(target)
            .map_err(|err| format!("failed to open audit log: {err}"))?;
        runner = runner.with_audit_sink(sink);
    }
    Ok(SuiteHarness {
        config,
        target,
        runner,
        stub,
    })
}

impl SuiteHarness {
    /// Returns the resolved configuration.
    pub fn config(&self) -> &SystemTestConfig {
        &self.config
    }

    /// Returns the stub when the harness targets one.
    pub fn stub(&self) -> Option<&StubApiHandle> {
        self.stub.as_ref()
    }

    /// Runs `scenario`, writes its artifacts, and returns the failure text.
    pub async fn run<S, Fut>(&self, name: &str, scenario: S) -> Result<(), String>
    where
        S: Fn(ProductsController<ReqwestTransport>) -> Fut,
        Fut: Future<Output = Result<(), ScenarioError>>,
    {
        let mut reporter = TestReporter::new(&self.config, name, self.target)
            .map_err(|err| format!("failed to create artifacts for {name}: {err}"))?;
        let report = self.runner.run(name, scenario).await;
        reporter.record(&report).map_err(|err| format!("failed to write artifacts: {err}"))?;
        let attempts = report.attempts.len();
        report.result.map_err(|err| {
            format!("{name} [{}] failed after {attempts} attempt(s): {err}", err.kind())
        })
    }
}
