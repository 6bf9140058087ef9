//! Common test utilities for building steps and graphs.
use flowgraph::prelude::*;
use serde_json::json;

/// Creates a bare step with the given transitions, using `-1` for END.
#[allow(dead_code)]
pub fn step(index: i64, on_success: i64, on_failure: i64) -> FlowStep {
    FlowStep::builder(index)
        .title(format!("step {}", index))
        .on_success(Target::from_wire(on_success))
        .on_failure(Target::from_wire(on_failure))
        .build()
}

/// Creates a step carrying nested constraints and cost metadata.
#[allow(dead_code)]
pub fn rich_step(index: i64) -> FlowStep {
    FlowStep::builder(index)
        .title("Verify OTP")
        .description("Checks the one-time password")
        .failure_code("OTP_INVALID")
        .on_success(Target::Step(11))
        .on_failure(Target::End)
        .constraint("maxAttempts", json!(3))
        .constraint("channels", json!(["sms", "email"]))
        .constraint("window", json!({ "seconds": 30, "strict": true }))
        .cost("latencyMs", 120.5)
        .cost("price", 0.01)
        .build()
}

/// Creates the two-step login flow.
///
/// Logic: `10 --ok--> 11 --ok--> END`, both failures end the flow.
#[allow(dead_code)]
pub fn create_auth_graph() -> FlowGraph {
    FlowGraph::from_steps("Auth", "d", vec![step(10, 11, -1), step(11, -1, -1)])
}
