//! Scenario tests for the fixture generator and scenario context.
//!
//! ```bash
//! cargo test --test scenarios
//! ```

mod steps;

use cucumber::World;
use steps::generator::GeneratorWorld;
use steps::scenario::ScenarioWorld;

#[tokio::main]
async fn main() {
    banking_fixtures::utils::bootstrap::init_tracing();

    // Run generator mode tests
    println!("\n=== Running Fixture Generator Scenarios ===\n");
    GeneratorWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/scenarios/features/generator.feature")
        .await;

    // Run batch tests
    println!("\n=== Running Batch Generation Scenarios ===\n");
    GeneratorWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/scenarios/features/batch.feature")
        .await;

    // Run scenario context tests
    println!("\n=== Running Scenario Context Scenarios ===\n");
    ScenarioWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/scenarios/features/scenario_context.feature")
        .await;
}
